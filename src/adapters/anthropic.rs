//! Anthropic Messages API adapter.
//!
//! Implements [`AssistantClient`] with a single non-streaming
//! `POST /v1/messages` per completion.
//!
//! # Example
//!
//! ```ignore
//! use gpt_term::adapters::AnthropicClient;
//! use gpt_term::traits::AssistantClient;
//!
//! let client = AnthropicClient::new("sk-ant-...").with_model("claude-3-5-haiku-latest");
//! let reply = client.complete("be brief", &history).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AssistantError;
use crate::models::Message;
use crate::startup::config::{AppConfig, DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::traits::AssistantClient;

/// Value sent in the `anthropic-version` header.
pub const API_VERSION: &str = "2023-06-01";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct RequestTurn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: Vec<RequestTurn<'a>>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// Completion client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_api_url(config.api_url.clone())
            .with_model(config.model.clone())
            .with_max_tokens(config.max_tokens)
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn convert_error(err: reqwest::Error) -> AssistantError {
        if err.is_decode() {
            AssistantError::InvalidResponse(err.to_string())
        } else {
            AssistantError::Connection(err.to_string())
        }
    }
}

#[async_trait]
impl AssistantClient for AnthropicClient {
    async fn complete(&self, system: &str, history: &[Message]) -> Result<String, AssistantError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages: history
                .iter()
                .map(|m| RequestTurn {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        tracing::debug!(model = %self.model, turns = body.messages.len(), "sending completion request");

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(Self::convert_error)?;

        let status = response.status();
        let text = response.text().await.map_err(Self::convert_error)?;

        if !status.is_success() {
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: MessagesResponse = serde_json::from_str(&text)
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;

        let reply: String = parsed
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect();

        if reply.is_empty() {
            return Err(AssistantError::EmptyResponse);
        }
        Ok(reply)
    }
}
