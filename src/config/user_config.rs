//! User-level configuration for leo
//!
//! Supports loading config from:
//! - An explicit `--config <PATH>`
//! - ~/.config/leo/config.toml
//! - Environment variables (highest priority)

use super::settings::{AiSettings, LexiconSettings, ScoringConfig, ValidationConfig};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LeoConfig {
    #[serde(default)]
    pub ai: AiSettings,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub lexicon: LexiconSettings,
}

impl LeoConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. `explicit` path if given, otherwise ~/.config/leo/config.toml
    ///
    /// An explicit path must exist and parse. A broken user config is
    /// reported and ignored.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::user_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path).unwrap_or_else(|e| {
                    warn!("Ignoring user config: {:#}", e);
                    LeoConfig::default()
                }),
                None => LeoConfig::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: LeoConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("leo").join("config.toml"))
    }

    /// Apply environment overrides through `lookup` (injected for tests)
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("ANTHROPIC_API_KEY") {
            self.ai.anthropic_api_key = Some(key);
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.ai.openai_api_key = Some(key);
        }
        if let Some(backend) = lookup("LEO_AI_BACKEND") {
            self.ai.backend = Some(backend);
        }
        if let Some(model) = lookup("LEO_AI_MODEL") {
            self.ai.model = Some(model);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scoring.is_valid() {
            bail!(
                "Invalid [scoring]: moderate_threshold ({}) must be > 0 and <= high_threshold ({})",
                self.scoring.moderate_threshold,
                self.scoring.high_threshold
            );
        }
        if !self.validation.is_valid() {
            bail!(
                "Invalid [validation]: min_length ({}) must be <= max_length ({}) and max_options > 0",
                self.validation.min_length,
                self.validation.max_length
            );
        }
        if !self.ai.is_valid() {
            bail!("Invalid [ai]: generated_confidence must be within 0..=1 and timeout_secs > 0");
        }
        Ok(())
    }

    /// Write an example config to `path` (or the user config path) unless
    /// one already exists. Returns the path.
    pub fn init_user_config(path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::user_config_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let example = r#"# Leo configuration

[ai]
# Ask an LLM for extra rewrites (rule-based options are always produced)
# enabled = true
# backend = "anthropic"   # or "openai", "openrouter", "deepinfra", "ollama"
# model = "claude-sonnet-4-20250514"
# timeout_secs = 20
# generated_confidence = 0.9

[scoring]
# category_weight = 2
# punctuation_weight = 1
# all_caps_weight = 3
# high_threshold = 6
# moderate_threshold = 3

[validation]
# min_length = 5
# max_length = 500
# max_options = 3

[lexicon]
# path = "/path/to/lexicon.toml"
"#;
            std::fs::write(&config_path, example)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
        }

        Ok(config_path)
    }
}
