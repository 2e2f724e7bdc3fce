//! Advisor configuration.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Configuration for the hint advisor.
///
/// Every field has a default, so an empty TOML file is valid.
/// API keys are never read from the file, only from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// LLM provider (gemini, openai or anthropic).
    #[serde(default = "default_provider")]
    provider: LlmProvider,

    /// Model name. Falls back to the provider's default.
    #[serde(default)]
    #[getter(skip)]
    model: Option<String>,

    /// Maximum tokens for the hint response.
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Seconds to wait for the advisor before falling back.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_provider() -> LlmProvider {
    LlmProvider::Gemini
}

fn default_max_tokens() -> u32 {
    150
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AdvisorConfig {
    /// Creates a configuration for a provider with default settings.
    #[instrument]
    pub fn new(provider: LlmProvider) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading advisor config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(provider = %config.provider, model = %config.model(), "Advisor config loaded");
        Ok(config)
    }

    /// Model name, resolved against the provider default.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Creates the LLM configuration, reading the API key from the environment.
    ///
    /// Gemini reads `GEMINI_API_KEY`, then `API_KEY`. OpenAI reads
    /// `OPENAI_API_KEY`, Anthropic reads `ANTHROPIC_API_KEY`.
    #[instrument(skip(self), fields(provider = %self.provider))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        self.create_llm_config_with(|name| std::env::var(name).ok())
    }

    /// Creates the LLM configuration using `lookup` to resolve variables.
    #[instrument(skip(self, lookup), fields(provider = %self.provider))]
    pub fn create_llm_config_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");
        let vars = self.provider.api_key_vars();
        let api_key = vars
            .iter()
            .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "{} environment variable not set",
                    vars.join(" or ")
                ))
            })?;

        Ok(LlmConfig::new(
            self.provider,
            api_key,
            self.model().to_string(),
            self.max_tokens,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
