//! Optional generative rewrites
//!
//! The mediation core never depends on this module to produce a result.
//! When enabled, an LLM contributes extra candidate rewrites that go through
//! the same validation as rule-based ones. Uses BYOK (bring your own key):
//! API keys come from the config file or environment variables.
//!
//! # Environment Variables
//!
//! - `ANTHROPIC_API_KEY`: Required for Anthropic backend
//! - `OPENAI_API_KEY`: Required for OpenAI backend
//! - `OPENROUTER_API_KEY`, `DEEPINFRA_API_KEY`: Other OpenAI-compatible backends
//!
//! # Example
//!
//! ```rust,ignore
//! use leo::ai::{AiClient, LlmGenerator, TimeoutGenerator};
//!
//! let client = AiClient::from_settings(&config.ai)?;
//! let generator = TimeoutGenerator::new(LlmGenerator::new(client), timeout);
//! ```

mod client;
mod generator;
mod prompts;

pub use client::{AiClient, AiConfig, LlmBackend};
pub use generator::{parse_numbered, Generator, LlmGenerator, TimeoutGenerator};
pub use prompts::{Prompt, PromptKind};

use thiserror::Error;

/// Errors that can occur in the AI module
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Missing API key: {env_var} not set. Get your key at {signup_url}")]
    MissingApiKey { env_var: String, signup_url: String },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Generator did not answer within {0:?}")]
    Timeout(std::time::Duration),

    #[error("Generator unavailable: {0}")]
    Unavailable(String),
}

pub type AiResult<T> = Result<T, AiError>;
