//! LLM API client for Gemini, OpenAI and Anthropic.

use crate::advisor::Advisor;
use crate::error::{AdvisorError, AdvisorErrorKind};
use crate::request::{HintRequest, SYSTEM_PROMPT};
use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";

/// LLM provider selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini (structured JSON output).
    Gemini,
    /// OpenAI (GPT models).
    OpenAI,
    /// Anthropic (Claude models).
    Anthropic,
}

impl LlmProvider {
    /// Model used when the configuration names none.
    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-2.5-flash",
            LlmProvider::OpenAI => "gpt-4o-mini",
            LlmProvider::Anthropic => "claude-3-5-haiku-20241022",
        }
    }

    /// Environment variables holding the API key, in lookup order.
    pub fn api_key_vars(self) -> &'static [&'static str] {
        match self {
            LlmProvider::Gemini => &["GEMINI_API_KEY", "API_KEY"],
            LlmProvider::OpenAI => &["OPENAI_API_KEY"],
            LlmProvider::Anthropic => &["ANTHROPIC_API_KEY"],
        }
    }
}

/// Configuration for LLM client.
#[derive(Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl LlmConfig {
    /// Creates a new LLM configuration.
    #[instrument(skip(api_key), fields(provider = ?provider, model = %model))]
    pub fn new(provider: LlmProvider, api_key: String, model: String, max_tokens: u32) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
        }
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Gets the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Gets the max tokens.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = ?config.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        info!("Creating LLM client");
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Generates a completion from a system prompt and user message.
    #[instrument(skip(self, system_prompt, user_message), fields(provider = ?self.config.provider, model = %self.config.model))]
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, AdvisorError> {
        debug!("Generating completion");
        match self.config.provider {
            LlmProvider::Gemini => self.generate_gemini(system_prompt, user_message).await,
            LlmProvider::OpenAI => self.generate_openai(system_prompt, user_message).await,
            LlmProvider::Anthropic => self.generate_anthropic(system_prompt, user_message).await,
        }
    }

    /// Posts a JSON body and returns the parsed JSON reply.
    #[instrument(skip(self, request))]
    async fn post_json(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, AdvisorError> {
        let response = request.send().await.map_err(|e| {
            AdvisorError::new(
                AdvisorErrorKind::Transport,
                format!("Request to {} failed: {}", url, e),
            )
        })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AdvisorError::new(
                AdvisorErrorKind::Transport,
                format!("Failed to read response: {}", e),
            )
        })?;

        if !status.is_success() {
            error!(status = %status, response = %response_text, "Advisor API error");
            return Err(AdvisorError::new(
                AdvisorErrorKind::Service,
                format!("API error {}: {}", status, response_text),
            ));
        }

        debug!(response_length = response_text.len(), "Parsing response");
        serde_json::from_str(&response_text).map_err(|e| {
            AdvisorError::new(
                AdvisorErrorKind::Malformed,
                format!("Failed to parse response: {}", e),
            )
        })
    }

    /// Generates a completion using Gemini with a JSON response schema.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_gemini(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, AdvisorError> {
        debug!("Building Gemini API request");
        let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, self.config.model);
        let request_body = gemini_request_body(system_prompt, user_message, self.config.max_tokens);

        let request = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.config.api_key.clone())
            .json(&request_body);
        let response_json = self.post_json(&url, request).await?;

        let content = gemini_reply_text(&response_json)?;
        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using Anthropic Claude.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_anthropic(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, AdvisorError> {
        debug!("Building Anthropic API request");
        let request_body = anthropic_request_body(
            &self.config.model,
            system_prompt,
            user_message,
            self.config.max_tokens,
        );

        let request = self
            .http
            .post(ANTHROPIC_URL)
            .header("x-api-key", self.config.api_key.clone())
            .header("anthropic-version", "2023-06-01")
            .json(&request_body);
        let response_json = self.post_json(ANTHROPIC_URL, request).await?;

        let content = anthropic_reply_text(&response_json)?;
        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using OpenAI.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_openai(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, AdvisorError> {
        debug!("Creating OpenAI client");
        let client = OpenAIClient::with_config(
            OpenAIConfig::new().with_api_key(self.config.api_key.clone()),
        );

        let build_error = |what: &str, e: &dyn std::fmt::Display| {
            AdvisorError::new(
                AdvisorErrorKind::Malformed,
                format!("Failed to build {}: {}", what, e),
            )
        };

        debug!("Building chat completion request");
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|e| build_error("system message", &e))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_message)
                    .build()
                    .map_err(|e| build_error("user message", &e))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .max_completion_tokens(self.config.max_tokens)
            .build()
            .map_err(|e| build_error("request", &e))?;

        debug!("Sending request to OpenAI");
        let response = client.chat().create(request).await.map_err(|e| {
            AdvisorError::new(AdvisorErrorKind::Service, format!("OpenAI API error: {}", e))
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AdvisorError::new(
                    AdvisorErrorKind::EmptyResponse,
                    "No content in OpenAI response",
                )
            })?;

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }
}

#[async_trait]
impl Advisor for LlmClient {
    fn name(&self) -> &str {
        self.config.model()
    }

    #[instrument(skip(self, request), fields(mark = %request.mark()))]
    async fn advise(&self, request: &HintRequest) -> Result<String, AdvisorError> {
        self.generate(SYSTEM_PROMPT, &request.user_message()).await
    }
}

/// Gemini `generateContent` body.
///
/// Thinking is switched off: thinking tokens count against
/// `maxOutputTokens` and would starve the short JSON reply.
fn gemini_request_body(system_prompt: &str, user_message: &str, max_tokens: u32) -> Value {
    json!({
        "systemInstruction": { "parts": [{ "text": system_prompt }] },
        "contents": [
            { "role": "user", "parts": [{ "text": user_message }] }
        ],
        "generationConfig": {
            "maxOutputTokens": max_tokens,
            "thinkingConfig": { "thinkingBudget": 0 },
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "suggestedIndex": {
                        "type": "INTEGER",
                        "description": "The index of the best move (0-8)"
                    },
                    "reasoning": {
                        "type": "STRING",
                        "description": "Short strategic reasoning"
                    }
                },
                "required": ["suggestedIndex", "reasoning"]
            }
        }
    })
}

/// Pulls the reply text out of a Gemini response envelope.
fn gemini_reply_text(response: &Value) -> Result<String, AdvisorError> {
    let candidate = &response["candidates"][0];
    candidate["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            AdvisorError::new(
                AdvisorErrorKind::EmptyResponse,
                format!(
                    "No text content in Gemini response (finishReason: {}): {}",
                    candidate["finishReason"].as_str().unwrap_or("none"),
                    response
                ),
            )
        })
}

/// Anthropic messages API body.
fn anthropic_request_body(
    model: &str,
    system_prompt: &str,
    user_message: &str,
    max_tokens: u32,
) -> Value {
    json!({
        "model": model,
        "max_tokens": max_tokens,
        "system": system_prompt,
        "messages": [
            {
                "role": "user",
                "content": user_message
            }
        ]
    })
}

/// Pulls the reply text out of an Anthropic response envelope.
fn anthropic_reply_text(response: &Value) -> Result<String, AdvisorError> {
    response["content"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            AdvisorError::new(
                AdvisorErrorKind::EmptyResponse,
                format!("No text content in Anthropic response: {}", response),
            )
        })
}
