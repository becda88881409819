//! ElevenLabs-compatible synthesis client.

use crate::error::SynthesisError;
use crate::settings::VoiceSettings;
use reqwest::{Client, Response};
use rootcause::prelude::Report;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// Default voice used when none is configured.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

const DEFAULT_TTS_MODEL: &str = "eleven_multilingual_v2";
const DEFAULT_STS_MODEL: &str = "eleven_multilingual_sts_v2";
const OUTPUT_FORMAT: &str = "mp3_44100_128";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the synthesis backend.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Voice identifier used for both rendering directions.
    pub voice_id: String,
    /// Model for text-to-speech requests.
    pub tts_model: String,
    /// Model for speech-to-speech requests.
    pub sts_model: String,
}

impl SpeechConfig {
    /// Creates a configuration with defaults for everything but the key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
            sts_model: DEFAULT_STS_MODEL.to_string(),
        }
    }

    /// Sets the voice identifier.
    #[must_use]
    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
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

/// Subscription details returned by the account lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionInfo {
    /// Subscription tier name.
    pub tier: String,
    /// Characters spent in the current cycle.
    pub character_count: u64,
    /// Character allowance for the cycle.
    pub character_limit: u64,
}

/// Voice-synthesis backend client.
pub struct SpeechClient {
    config: SpeechConfig,
    client: Client,
}

impl SpeechClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: SpeechConfig) -> Result<Self, Report<SynthesisError>> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SynthesisError::RequestFailed {
                reason: e.to_string(),
            })?;

        Ok(Self { config, client })
    }

    /// The voice identifier requests are made with.
    #[must_use]
    pub fn voice_id(&self) -> &str {
        &self.config.voice_id
    }

    /// Renders `text` with the given settings and returns encoded audio.
    ///
    /// Settings are clamped to their valid ranges before the request is
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the synthesis call fails.
    #[instrument(skip(self, text, settings), fields(voice = %self.config.voice_id, chars = text.len()))]
    pub async fn text_to_speech(
        &self,
        text: &str,
        settings: &VoiceSettings,
    ) -> Result<Vec<u8>, Report<SynthesisError>> {
        let url = format!(
            "{}/v1/text-to-speech/{}?output_format={OUTPUT_FORMAT}",
            self.config.base_url, self.config.voice_id
        );
        let body = json!({
            "text": text,
            "model_id": self.config.tts_model,
            "voice_settings": settings.clamped(),
        });

        let response = self
            .client
            .post(url)
            .header("xi-api-key", self.config.api_key())
            .header("Accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| SynthesisError::RequestFailed {
                reason: e.to_string(),
            })?;

        let response = Self::check_status(response).await?;
        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::RequestFailed {
                reason: e.to_string(),
            })?;

        debug!(bytes = audio.len(), "speech rendered");
        Ok(audio.to_vec())
    }

    /// Re-voices recorded audio, keeping the speech content.
    ///
    /// # Errors
    ///
    /// Returns an error if the source audio cannot be read or the
    /// transformation call fails.
    #[instrument(skip(self), fields(voice = %self.config.voice_id))]
    pub async fn speech_to_speech(
        &self,
        audio_path: &Path,
    ) -> Result<Vec<u8>, Report<SynthesisError>> {
        let bytes =
            tokio::fs::read(audio_path)
                .await
                .map_err(|e| SynthesisError::AudioUnreadable {
                    path: audio_path.display().to_string(),
                    reason: e.to_string(),
                })?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("input.ogg")
            .mime_str("audio/ogg")
            .map_err(|e| SynthesisError::RequestFailed {
                reason: e.to_string(),
            })?;
        let form = reqwest::multipart::Form::new()
            .part("audio", part)
            .text("model_id", self.config.sts_model.clone());

        let url = format!(
            "{}/v1/speech-to-speech/{}?output_format={OUTPUT_FORMAT}",
            self.config.base_url, self.config.voice_id
        );

        let response = self
            .client
            .post(url)
            .header("xi-api-key", self.config.api_key())
            .header("Accept", "audio/mpeg")
            .multipart(form)
            .send()
            .await
            .map_err(|e| SynthesisError::RequestFailed {
                reason: e.to_string(),
            })?;

        let response = Self::check_status(response).await?;
        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::RequestFailed {
                reason: e.to_string(),
            })?;

        debug!(bytes = audio.len(), "voice transformed");
        Ok(audio.to_vec())
    }

    /// Fetches account/subscription status; part of startup verification.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub async fn subscription(&self) -> Result<SubscriptionInfo, Report<SynthesisError>> {
        let url = format!("{}/v1/user/subscription", self.config.base_url);
        let response = self
            .client
            .get(url)
            .header("xi-api-key", self.config.api_key())
            .send()
            .await
            .map_err(|e| SynthesisError::RequestFailed {
                reason: e.to_string(),
            })?;

        let response = Self::check_status(response).await?;
        let info: SubscriptionInfo =
            response
                .json()
                .await
                .map_err(|e| SynthesisError::ResponseParseFailed {
                    reason: e.to_string(),
                })?;

        Ok(info)
    }

    /// Confirms the configured voice exists; part of startup verification.
    ///
    /// # Errors
    ///
    /// Returns `VoiceNotFound` when the voice id is unknown, or another
    /// error if the lookup fails.
    pub async fn verify_voice(&self) -> Result<(), Report<SynthesisError>> {
        let url = format!("{}/v1/voices/{}", self.config.base_url, self.config.voice_id);
        let response = self
            .client
            .get(url)
            .header("xi-api-key", self.config.api_key())
            .send()
            .await
            .map_err(|e| SynthesisError::RequestFailed {
                reason: e.to_string(),
            })?;

        if response.status().as_u16() == 404 {
            return Err(SynthesisError::VoiceNotFound {
                voice_id: self.config.voice_id.clone(),
            }
            .into());
        }

        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: Response) -> Result<Response, Report<SynthesisError>> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        let error = match status.as_u16() {
            401 => SynthesisError::InvalidApiKey,
            429 => SynthesisError::RateLimited,
            500..=599 => SynthesisError::Unavailable { reason: message },
            code => SynthesisError::Rejected {
                status: code,
                message,
            },
        };
        Err(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = SpeechConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.voice_id, DEFAULT_VOICE_ID);
        assert_eq!(config.tts_model, DEFAULT_TTS_MODEL);
        assert_eq!(config.sts_model, DEFAULT_STS_MODEL);
    }

    #[test]
    fn config_builder_overrides_voice() {
        let config = SpeechConfig::new("key").with_voice_id("custom-voice");
        assert_eq!(config.voice_id, "custom-voice");
        assert_eq!(config.api_key(), "key");
    }

    #[test]
    fn subscription_fixture_parses() {
        let body = r#"{
            "tier": "starter",
            "character_count": 1200,
            "character_limit": 30000,
            "can_extend_character_limit": false
        }"#;

        let info: SubscriptionInfo = serde_json::from_str(body).expect("parse");
        assert_eq!(info.tier, "starter");
        assert_eq!(info.character_count, 1200);
        assert_eq!(info.character_limit, 30000);
    }

    #[test]
    fn tts_body_includes_clamped_settings() {
        let settings = VoiceSettings {
            stability: 4.0,
            similarity_boost: 0.9,
            speed: 0.1,
        };
        let body = json!({
            "text": "hola",
            "model_id": DEFAULT_TTS_MODEL,
            "voice_settings": settings.clamped(),
        });

        assert_eq!(body["voice_settings"]["stability"], 1.0);
        let speed = body["voice_settings"]["speed"].as_f64().expect("speed");
        assert!((speed - 0.7).abs() < 1e-6);
    }
}
