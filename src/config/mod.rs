//! Configuration module for Leo
//!
//! This module handles:
//! - User-level configuration (~/.config/leo/config.toml)
//! - Environment variable overrides
//! - Scoring, validation, generator and lexicon settings

mod settings;
mod user_config;

pub use settings::{AiSettings, LexiconSettings, ScoringConfig, ValidationConfig};
pub use user_config::LeoConfig;
