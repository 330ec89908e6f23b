//! LLM API client for the optional generator
//!
//! Speaks the Anthropic messages API and the OpenAI chat-completions API
//! (which OpenRouter, DeepInfra and Ollama also serve). Leo only ever sends
//! one system prompt and one user turn, so a request is a single
//! [`Prompt`] in and one block of text out.
//!
//! Uses ureq (sync HTTP), so no async runtime is needed. Callers that need
//! a hard deadline wrap the client in a [`super::TimeoutGenerator`].

use crate::ai::{AiError, AiResult, Prompt};
use crate::config::AiSettings;
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Supported LLM backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmBackend {
    #[default]
    Anthropic,
    OpenAi,
    Deepinfra,
    OpenRouter,
    Ollama,
}

/// Static facts about one backend
struct Endpoint {
    url: &'static str,
    /// `None` when the backend runs locally without a key
    key_var: Option<&'static str>,
    key_url: &'static str,
    default_model: &'static str,
}

impl LlmBackend {
    fn endpoint(self) -> Endpoint {
        match self {
            LlmBackend::Anthropic => Endpoint {
                url: "https://api.anthropic.com/v1/messages",
                key_var: Some("ANTHROPIC_API_KEY"),
                key_url: "https://console.anthropic.com/settings/keys",
                default_model: "claude-sonnet-4-20250514",
            },
            LlmBackend::OpenAi => Endpoint {
                url: "https://api.openai.com/v1/chat/completions",
                key_var: Some("OPENAI_API_KEY"),
                key_url: "https://platform.openai.com/api-keys",
                default_model: "gpt-4o-mini",
            },
            LlmBackend::Deepinfra => Endpoint {
                url: "https://api.deepinfra.com/v1/openai/chat/completions",
                key_var: Some("DEEPINFRA_API_KEY"),
                key_url: "https://deepinfra.com/dash/api_keys",
                default_model: "meta-llama/Llama-3.3-70B-Instruct",
            },
            LlmBackend::OpenRouter => Endpoint {
                url: "https://openrouter.ai/api/v1/chat/completions",
                key_var: Some("OPENROUTER_API_KEY"),
                key_url: "https://openrouter.ai/keys",
                default_model: "anthropic/claude-sonnet-4",
            },
            LlmBackend::Ollama => Endpoint {
                url: "http://localhost:11434/v1/chat/completions",
                key_var: None,
                key_url: "https://ollama.ai",
                default_model: "mistral:7b",
            },
        }
    }

    pub fn default_model(self) -> &'static str {
        self.endpoint().default_model
    }
}

impl FromStr for LlmBackend {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(LlmBackend::Anthropic),
            "openai" => Ok(LlmBackend::OpenAi),
            "deepinfra" => Ok(LlmBackend::Deepinfra),
            "openrouter" => Ok(LlmBackend::OpenRouter),
            "ollama" => Ok(LlmBackend::Ollama),
            other => Err(AiError::ConfigError(format!(
                "unknown backend '{}'. Valid: anthropic, openai, deepinfra, openrouter, ollama",
                other
            ))),
        }
    }
}

/// Request parameters resolved from `[ai]`
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub backend: LlmBackend,
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::default(),
            model: None,
            max_tokens: 300,
            temperature: 0.7,
            timeout: Duration::from_secs(20),
        }
    }
}

impl AiConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }

    pub fn from_settings(settings: &AiSettings) -> AiResult<Self> {
        Ok(Self {
            backend: settings.backend_name().parse()?,
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout: Duration::from_secs(settings.timeout_secs),
        })
    }

    /// JSON body for one system + user exchange in the backend's wire format
    fn request_body(&self, prompt: &Prompt) -> serde_json::Value {
        match self.backend {
            LlmBackend::Anthropic => json!({
                "model": self.model(),
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "system": prompt.system,
                "messages": [{ "role": "user", "content": prompt.user }],
            }),
            _ => json!({
                "model": self.model(),
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "messages": [
                    { "role": "system", "content": prompt.system },
                    { "role": "user", "content": prompt.user },
                ],
            }),
        }
    }
}

/// Either wire format's reply; only the fields leo reads
#[derive(Deserialize)]
struct Reply {
    /// OpenAI-compatible
    #[serde(default)]
    choices: Vec<Choice>,
    /// Anthropic
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl Reply {
    fn into_text(self) -> Option<String> {
        let Reply { choices, content } = self;
        choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .or_else(|| content.into_iter().find(|b| b.kind == "text").map(|b| b.text))
    }
}

/// Sync HTTP client for one configured backend
pub struct AiClient {
    config: AiConfig,
    api_key: Option<String>,
    agent: ureq::Agent,
}

impl AiClient {
    pub fn new(config: AiConfig, api_key: Option<String>) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false) // statuses are mapped in `complete`
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();
        Self {
            config,
            api_key,
            agent,
        }
    }

    /// Build a client from `[ai]` settings. A key in the settings wins over
    /// the backend's environment variable.
    pub fn from_settings(settings: &AiSettings) -> AiResult<Self> {
        let mut config = AiConfig::from_settings(settings)?;
        let endpoint = config.backend.endpoint();

        let Some(key_var) = endpoint.key_var else {
            if config.model.is_none() {
                config.model = env::var("OLLAMA_MODEL").ok();
            }
            return Ok(Self::new(config, None));
        };

        let configured = match config.backend {
            LlmBackend::Anthropic => settings.anthropic_api_key.clone(),
            LlmBackend::OpenAi => settings.openai_api_key.clone(),
            _ => None,
        };
        let api_key = configured
            .or_else(|| env::var(key_var).ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AiError::MissingApiKey {
                env_var: key_var.to_string(),
                signup_url: endpoint.key_url.to_string(),
            })?;

        Ok(Self::new(config, Some(api_key)))
    }

    pub fn backend(&self) -> LlmBackend {
        self.config.backend
    }

    pub fn model(&self) -> &str {
        self.config.model()
    }

    /// Send `prompt` and return the model's text
    pub fn complete(&self, prompt: &Prompt) -> AiResult<String> {
        let mut request = self
            .agent
            .post(self.config.backend.endpoint().url)
            .header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            request = match self.config.backend {
                LlmBackend::Anthropic => request
                    .header("x-api-key", key)
                    .header("anthropic-version", ANTHROPIC_VERSION),
                _ => request.header("Authorization", &format!("Bearer {}", key)),
            };
        }

        let response = request
            .send_json(self.config.request_body(prompt))
            .map_err(|e| AiError::ApiError {
                status: 0,
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(AiError::ApiError {
                status,
                message: response.into_body().read_to_string().unwrap_or_default(),
            });
        }

        response
            .into_body()
            .read_json::<Reply>()
            .map_err(|e| AiError::ParseError(e.to_string()))?
            .into_text()
            .ok_or_else(|| AiError::ParseError("reply carried no text".to_string()))
    }
}
