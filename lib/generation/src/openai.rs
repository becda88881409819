//! OpenAI-compatible chat-completion client.

use crate::backend::ChatBackend;
use crate::error::GenerationError;
use async_trait::async_trait;
use parakeet_conversation::{ChatMessage, Role};
use reqwest::Client;
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Configuration for the OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
}

impl OpenAiConfig {
    /// Creates a configuration with defaults for everything but the key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Sets the model to use.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Chat-completion client for OpenAI-compatible APIs.
pub struct OpenAiChatClient {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiChatClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: OpenAiConfig) -> Result<Self, Report<GenerationError>> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GenerationError::RequestFailed {
                reason: e.to_string(),
            })?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    async fn send(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, Report<GenerationError>> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let error = match status.as_u16() {
                401 => GenerationError::Unauthorized,
                429 => GenerationError::RateLimited,
                500..=599 => GenerationError::Unavailable { reason: message },
                code => GenerationError::Rejected {
                    status: code,
                    message,
                },
            };
            return Err(error.into());
        }

        let parsed: CompletionResponse =
            response
                .json()
                .await
                .map_err(|e| GenerationError::ResponseParseFailed {
                    reason: e.to_string(),
                })?;

        Ok(parsed)
    }
}

#[async_trait]
impl ChatBackend for OpenAiChatClient {
    #[instrument(skip(self, messages), fields(model = %self.config.model, entries = messages.len()))]
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Report<GenerationError>> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: messages.iter().map(WireMessage::from).collect(),
            max_tokens: None,
        };

        let response = self.send(&request).await?;
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            GenerationError::ResponseParseFailed {
                reason: "no choices in response".to_string(),
            }
        })?;

        debug!(finish_reason = ?choice.finish_reason, "completion received");
        Ok(choice.message.content)
    }

    async fn verify(&self) -> Result<(), Report<GenerationError>> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![WireMessage {
                role: "user".to_string(),
                content: "ping".to_string(),
            }],
            max_tokens: Some(1),
        };

        self.send(&request).await.map(|_| ())
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        let role = match message.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role: role.to_string(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: WireMessage,
    finish_reason: Option<String>,
}
