//! Tunable settings for the mediation pipeline
//!
//! Every section deserializes with defaults, so a config file only needs to
//! name the values it changes.

use crate::scoring::{
    DEFAULT_ALL_CAPS_WEIGHT, DEFAULT_CATEGORY_WEIGHT, DEFAULT_HIGH_THRESHOLD,
    DEFAULT_MODERATE_THRESHOLD, DEFAULT_PUNCTUATION_WEIGHT,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Impact scoring weights and level thresholds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Weight per category-style signal (default: 2)
    #[serde(default = "default_category_weight")]
    pub category_weight: u32,

    /// Weight for excessive exclamation marks (default: 1)
    #[serde(default = "default_punctuation_weight")]
    pub punctuation_weight: u32,

    /// Weight for an all-caps message (default: 3)
    #[serde(default = "default_all_caps_weight")]
    pub all_caps_weight: u32,

    /// Score at or above which impact is high (default: 6)
    #[serde(default = "default_high_threshold")]
    pub high_threshold: u32,

    /// Score at or above which impact is moderate (default: 3)
    #[serde(default = "default_moderate_threshold")]
    pub moderate_threshold: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            category_weight: default_category_weight(),
            punctuation_weight: default_punctuation_weight(),
            all_caps_weight: default_all_caps_weight(),
            high_threshold: default_high_threshold(),
            moderate_threshold: default_moderate_threshold(),
        }
    }
}

impl ScoringConfig {
    /// Thresholds must be ordered and non-zero
    pub fn is_valid(&self) -> bool {
        self.moderate_threshold > 0 && self.moderate_threshold <= self.high_threshold
    }
}

fn default_category_weight() -> u32 {
    DEFAULT_CATEGORY_WEIGHT
}
fn default_punctuation_weight() -> u32 {
    DEFAULT_PUNCTUATION_WEIGHT
}
fn default_all_caps_weight() -> u32 {
    DEFAULT_ALL_CAPS_WEIGHT
}
fn default_high_threshold() -> u32 {
    DEFAULT_HIGH_THRESHOLD
}
fn default_moderate_threshold() -> u32 {
    DEFAULT_MODERATE_THRESHOLD
}

/// Candidate quality bounds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Minimum candidate length in characters (default: 5)
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Maximum candidate length in characters (default: 500)
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Maximum options returned to the caller (default: 3)
    #[serde(default = "default_max_options")]
    pub max_options: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            max_options: default_max_options(),
        }
    }
}

impl ValidationConfig {
    pub fn is_valid(&self) -> bool {
        self.min_length <= self.max_length && self.max_options > 0
    }
}

fn default_min_length() -> usize {
    5
}
fn default_max_length() -> usize {
    500
}
fn default_max_options() -> usize {
    3
}

/// Optional generative collaborator
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AiSettings {
    /// Ask the LLM for extra candidates (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Backend: "anthropic" (default), "openai", "openrouter", "deepinfra", "ollama"
    #[serde(default)]
    pub backend: Option<String>,

    /// Model override (default depends on backend)
    #[serde(default)]
    pub model: Option<String>,

    /// Anthropic API key (ANTHROPIC_API_KEY takes precedence)
    #[serde(default)]
    pub anthropic_api_key: Option<String>,

    /// OpenAI API key (OPENAI_API_KEY takes precedence)
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Hard deadline for one generation call, in seconds (default: 20)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Token budget per call (default: 300)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (default: 0.7)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Confidence assigned to generated options (default: 0.9)
    #[serde(default = "default_generated_confidence")]
    pub generated_confidence: f64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            backend: None,
            model: None,
            anthropic_api_key: None,
            openai_api_key: None,
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            generated_confidence: default_generated_confidence(),
        }
    }
}

impl AiSettings {
    pub fn backend_name(&self) -> &str {
        self.backend.as_deref().unwrap_or("anthropic")
    }

    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.generated_confidence) && self.timeout_secs > 0
    }
}

fn default_timeout_secs() -> u64 {
    20
}
fn default_max_tokens() -> u32 {
    300
}
fn default_temperature() -> f32 {
    0.7
}
fn default_generated_confidence() -> f64 {
    0.9
}

/// Lexicon source
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LexiconSettings {
    /// TOML lexicon replacing the built-in French table
    #[serde(default)]
    pub path: Option<PathBuf>,
}
