//! Bot API client.

use crate::error::TelegramError;
use crate::types::{ApiResponse, FileInfo, Message, Update, User};
use futures::StreamExt;
use parakeet_core::ChatId;
use reqwest::Client;
use rootcause::prelude::Report;
use serde::de::DeserializeOwned;
use serde_json::{Value as JsonValue, json};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::instrument;

/// Default API host.
pub const API_BASE_URL: &str = "https://api.telegram.org";

// Long polls run up to 50s server-side; leave headroom before the
// client-side timeout fires.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Progress indicators for `send_chat_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    /// "typing…" indicator.
    Typing,
    /// "recording voice message…" indicator.
    RecordVoice,
}

impl ChatAction {
    /// The wire name of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Typing => "typing",
            Self::RecordVoice => "record_voice",
        }
    }
}

/// Thin client over the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    token: String,
    base_url: String,
    client: Client,
}

impl TelegramClient {
    /// Creates a client for the given bot token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(token: impl Into<String>) -> Result<Self, Report<TelegramError>> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TelegramError::Transport {
                reason: e.to_string(),
            })?;

        Ok(Self {
            token: token.into(),
            base_url: API_BASE_URL.to_string(),
            client,
        })
    }

    /// Points the client at a different API host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &JsonValue,
    ) -> Result<T, Report<TelegramError>> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await
            .map_err(|e| TelegramError::Transport {
                reason: e.to_string(),
            })?;

        Self::read_envelope(response).await
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, Report<TelegramError>> {
        let envelope: ApiResponse<T> =
            response
                .json()
                .await
                .map_err(|e| TelegramError::ResponseParseFailed {
                    reason: e.to_string(),
                })?;

        if !envelope.ok {
            return Err(TelegramError::Api {
                description: envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            }
            .into());
        }

        match envelope.result {
            Some(result) => Ok(result),
            None => Err(TelegramError::ResponseParseFailed {
                reason: "missing result field".to_string(),
            }
            .into()),
        }
    }

    /// Confirms the token by fetching the bot's own profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the call fails.
    pub async fn get_me(&self) -> Result<User, Report<TelegramError>> {
        self.call("getMe", &json!({})).await
    }

    /// Long-polls for updates with ids greater than or equal to `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the poll fails.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u32,
    ) -> Result<Vec<Update>, Report<TelegramError>> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    /// Sends a plain-text message.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails.
    pub async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
    ) -> Result<Message, Report<TelegramError>> {
        self.call(
            "sendMessage",
            &json!({
                "chat_id": chat.as_i64(),
                "text": text,
            }),
        )
        .await
    }

    /// Shows a progress indicator in the chat. Callers treat failures as
    /// best-effort.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn send_chat_action(
        &self,
        chat: ChatId,
        action: ChatAction,
    ) -> Result<(), Report<TelegramError>> {
        let _: bool = self
            .call(
                "sendChatAction",
                &json!({
                    "chat_id": chat.as_i64(),
                    "action": action.as_str(),
                }),
            )
            .await?;
        Ok(())
    }

    /// Uploads the audio file at `path` as a voice message.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or delivery fails.
    #[instrument(skip(self, path), fields(chat = %chat))]
    pub async fn send_voice(
        &self,
        chat: ChatId,
        path: &Path,
        file_name: &str,
    ) -> Result<Message, Report<TelegramError>> {
        let audio = tokio::fs::read(path)
            .await
            .map_err(|e| TelegramError::Io {
                reason: e.to_string(),
            })?;

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/mpeg")
            .map_err(|e| TelegramError::InvalidPayload {
                reason: e.to_string(),
            })?;
        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat.as_i64().to_string())
            .part("voice", part);

        let response = self
            .client
            .post(self.method_url("sendVoice"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| TelegramError::Transport {
                reason: e.to_string(),
            })?;

        Self::read_envelope(response).await
    }

    /// Resolves a file id into download metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub async fn get_file(&self, file_id: &str) -> Result<FileInfo, Report<TelegramError>> {
        self.call("getFile", &json!({ "file_id": file_id })).await
    }

    /// Downloads a previously resolved file to `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the download or the local write fails.
    #[instrument(skip(self, dest))]
    pub async fn download_file(
        &self,
        file_path: &str,
        dest: &Path,
    ) -> Result<(), Report<TelegramError>> {
        let url = format!("{}/file/bot{}/{}", self.base_url, self.token, file_path);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TelegramError::Transport {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(TelegramError::Api {
                description: format!("file download failed with HTTP {}", response.status()),
            }
            .into());
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| TelegramError::Io {
                reason: e.to_string(),
            })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| TelegramError::Transport {
                reason: e.to_string(),
            })?;
            file.write_all(&chunk)
                .await
                .map_err(|e| TelegramError::Io {
                    reason: e.to_string(),
                })?;
        }

        file.flush().await.map_err(|e| TelegramError::Io {
            reason: e.to_string(),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_actions_have_wire_names() {
        assert_eq!(ChatAction::Typing.as_str(), "typing");
        assert_eq!(ChatAction::RecordVoice.as_str(), "record_voice");
    }

    #[test]
    fn method_url_embeds_token() {
        let client = TelegramClient::new("123:abc").expect("client");
        assert_eq!(
            client.method_url("getMe"),
            "https://api.telegram.org/bot123:abc/getMe"
        );
    }

    #[test]
    fn base_url_override_applies() {
        let client = TelegramClient::new("123:abc")
            .expect("client")
            .with_base_url("http://localhost:8081");
        assert_eq!(
            client.method_url("getUpdates"),
            "http://localhost:8081/bot123:abc/getUpdates"
        );
    }
}
