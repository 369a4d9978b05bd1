use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LanguageModelError;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
const DEFAULT_MAX_TOKENS: u32 = 1024;
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A text-in, text-out completion backend.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a single user message and return the model's text reply.
    ///
    /// # Errors
    ///
    /// Returns `LanguageModelError` when the request fails, the service
    /// answers with a non-success status, or the reply has no text.
    async fn complete(&self, prompt: &str) -> Result<String, LanguageModelError>;
}

#[derive(Clone, Debug)]
pub struct LanguageModelConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
}

impl LanguageModelConfig {
    /// Config with default endpoint, model, and token limit.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Read `ANTHROPIC_API_KEY` plus optional `STUDY_AI_*` overrides.
    ///
    /// Returns `None` when the key is unset or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("ANTHROPIC_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var("STUDY_AI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = env::var("STUDY_AI_MODEL") {
            config.model = model;
        }
        if let Some(max_tokens) = env::var("STUDY_AI_MAX_TOKENS")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
        {
            config.max_tokens = max_tokens;
        }
        Some(config)
    }
}

/// Anthropic Messages API client.
///
/// No timeout and no retry: one attempt per call.
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    config: LanguageModelConfig,
}

impl AnthropicClient {
    #[must_use]
    pub fn new(config: LanguageModelConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, LanguageModelError> {
        let url = format!("{}/messages", self.config.base_url.trim_end_matches('/'));
        let payload = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };
        debug!(model = %self.config.model, prompt_len = prompt.len(), "sending model request");

        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await);
            return Err(LanguageModelError::HttpStatus { status, body });
        }

        let body: MessagesResponse = response.json().await?;
        body.content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or(LanguageModelError::EmptyResponse)
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Body text for a failed call; a failed read is reported in its place.
fn error_body(read: Result<String, reqwest::Error>) -> String {
    read.unwrap_or_else(|err| format!("<unreadable body: {err}>"))
}
