//! Bot API wire types.
//!
//! Deserialization is tolerant: unknown fields are ignored, and
//! everything the relay does not strictly need is optional.

use serde::Deserialize;

/// Envelope every Bot API response is wrapped in.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub ok: bool,
    /// The method's result when `ok` is true.
    pub result: Option<T>,
    /// Human-readable error description when `ok` is false.
    pub description: Option<String>,
}

/// An incoming update from long polling.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonically increasing update identifier.
    pub update_id: i64,
    /// The new message, if this update carries one.
    pub message: Option<Message>,
}

/// A chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message identifier within the chat.
    pub message_id: i64,
    /// The sender; absent for channel posts.
    pub from: Option<User>,
    /// The chat the message belongs to.
    pub chat: Chat,
    /// Text content, if any.
    pub text: Option<String>,
    /// Voice note attachment, if any.
    pub voice: Option<Voice>,
    /// Audio file attachment, if any.
    pub audio: Option<Audio>,
}

impl Message {
    /// Returns the attached audio's file id, preferring voice notes.
    #[must_use]
    pub fn audio_file_id(&self) -> Option<&str> {
        self.voice
            .as_ref()
            .map(|v| v.file_id.as_str())
            .or_else(|| self.audio.as_ref().map(|a| a.file_id.as_str()))
    }

    /// Returns true when the message carries a voice note or audio file.
    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.voice.is_some() || self.audio.is_some()
    }
}

/// A Telegram user (also returned by `getMe` for the bot itself).
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Platform-assigned user identifier.
    pub id: i64,
    /// Whether this account is a bot.
    #[serde(default)]
    pub is_bot: bool,
    /// Display name.
    pub first_name: String,
    /// Username without the leading `@`, if set.
    pub username: Option<String>,
}

/// A chat.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Platform-assigned chat identifier.
    pub id: i64,
}

/// A voice note.
#[derive(Debug, Clone, Deserialize)]
pub struct Voice {
    /// Identifier used to download the file.
    pub file_id: String,
    /// Duration in seconds.
    pub duration: u32,
    /// MIME type as reported by the platform.
    pub mime_type: Option<String>,
}

/// An audio file.
#[derive(Debug, Clone, Deserialize)]
pub struct Audio {
    /// Identifier used to download the file.
    pub file_id: String,
    /// Duration in seconds.
    pub duration: u32,
    /// Original file name, if known.
    pub file_name: Option<String>,
    /// MIME type as reported by the platform.
    pub mime_type: Option<String>,
}

/// File metadata resolved via `getFile`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    /// The file identifier that was resolved.
    pub file_id: String,
    /// Path component for the download URL; valid for about an hour.
    pub file_path: Option<String>,
    /// Size in bytes, if known.
    pub file_size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_update_deserializes() {
        let body = r#"{
            "update_id": 1001,
            "message": {
                "message_id": 5,
                "from": {"id": 42, "is_bot": false, "first_name": "Ada", "username": "ada"},
                "chat": {"id": 42, "type": "private"},
                "date": 1700000000,
                "text": "/help"
            }
        }"#;

        let update: Update = serde_json::from_str(body).expect("parse");
        assert_eq!(update.update_id, 1001);

        let message = update.message.expect("message");
        assert_eq!(message.text.as_deref(), Some("/help"));
        assert_eq!(message.from.as_ref().expect("from").id, 42);
        assert!(!message.has_audio());
    }

    #[test]
    fn voice_update_deserializes() {
        let body = r#"{
            "update_id": 1002,
            "message": {
                "message_id": 6,
                "from": {"id": 42, "first_name": "Ada"},
                "chat": {"id": 42},
                "voice": {"file_id": "AwACAgI", "duration": 3, "mime_type": "audio/ogg"}
            }
        }"#;

        let update: Update = serde_json::from_str(body).expect("parse");
        let message = update.message.expect("message");

        assert!(message.has_audio());
        assert_eq!(message.audio_file_id(), Some("AwACAgI"));
    }

    #[test]
    fn voice_takes_precedence_over_audio() {
        let body = r#"{
            "message_id": 7,
            "chat": {"id": 1},
            "voice": {"file_id": "voice-id", "duration": 2},
            "audio": {"file_id": "audio-id", "duration": 2}
        }"#;

        let message: Message = serde_json::from_str(body).expect("parse");
        assert_eq!(message.audio_file_id(), Some("voice-id"));
    }

    #[test]
    fn error_envelope_deserializes() {
        let body = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;

        let response: ApiResponse<Update> = serde_json::from_str(body).expect("parse");
        assert!(!response.ok);
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));
        assert!(response.result.is_none());
    }
}
