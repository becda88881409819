//! Bot configuration.
//!
//! All configuration arrives through environment variables, loaded via
//! the `config` crate into a strongly-typed struct. Comma-separated id
//! lists are parsed with a custom deserializer so a bad entry fails
//! loudly at startup instead of silently dropping a user.

use config::{Config, ConfigError, Environment};
use parakeet_core::UserId;
use serde::{Deserialize, Deserializer};

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token (`TELEGRAM_BOT_TOKEN`).
    pub telegram_bot_token: String,

    /// Voice-synthesis API key (`ELEVENLABS_API_KEY`).
    pub elevenlabs_api_key: String,

    /// Users allowed to interact with the bot
    /// (`AUTHORIZED_USER_IDS`, comma-separated).
    #[serde(deserialize_with = "deserialize_id_list")]
    pub authorized_user_ids: Vec<UserId>,

    /// Generation-backend API key (`OPENAI_API_KEY`); absence disables
    /// all text-generation pipelines.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Users with admin privileges (`ADMIN_USER_IDS`, comma-separated).
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub admin_user_ids: Vec<UserId>,

    /// Override voice identifier (`VOICE_ID`).
    #[serde(default)]
    pub voice_id: Option<String>,
}

impl BotConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::default())
            .build()?
            .try_deserialize()
    }

    /// The voice identifier to use, falling back to the default voice.
    #[must_use]
    pub fn voice_id(&self) -> &str {
        self.voice_id
            .as_deref()
            .unwrap_or(parakeet_synthesis::DEFAULT_VOICE_ID)
    }

    /// Returns true when the generation backend is configured.
    #[must_use]
    pub fn generation_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<UserId>()
                .map_err(|e| serde::de::Error::custom(e.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct IdListProbe {
        #[serde(deserialize_with = "deserialize_id_list")]
        ids: Vec<UserId>,
    }

    #[test]
    fn id_list_splits_on_commas() {
        let probe: IdListProbe =
            serde_json::from_str(r#"{"ids": "1, 22 ,333"}"#).expect("parse");

        assert_eq!(
            probe.ids,
            vec![UserId::new(1), UserId::new(22), UserId::new(333)]
        );
    }

    #[test]
    fn id_list_tolerates_empty_entries() {
        let probe: IdListProbe = serde_json::from_str(r#"{"ids": "1,,2,"}"#).expect("parse");

        assert_eq!(probe.ids, vec![UserId::new(1), UserId::new(2)]);
    }

    #[test]
    fn id_list_rejects_garbage() {
        let result = serde_json::from_str::<IdListProbe>(r#"{"ids": "1,abc"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn voice_id_falls_back_to_default() {
        let config = BotConfig {
            telegram_bot_token: "t".to_string(),
            elevenlabs_api_key: "k".to_string(),
            authorized_user_ids: vec![],
            openai_api_key: None,
            admin_user_ids: vec![],
            voice_id: None,
        };

        assert_eq!(config.voice_id(), parakeet_synthesis::DEFAULT_VOICE_ID);
        assert!(!config.generation_enabled());
    }

    #[test]
    fn voice_id_override_wins() {
        let config = BotConfig {
            telegram_bot_token: "t".to_string(),
            elevenlabs_api_key: "k".to_string(),
            authorized_user_ids: vec![UserId::new(1)],
            openai_api_key: Some("sk-test".to_string()),
            admin_user_ids: vec![],
            voice_id: Some("custom".to_string()),
        };

        assert_eq!(config.voice_id(), "custom");
        assert!(config.generation_enabled());
    }
}
