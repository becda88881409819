//! Error types for the telegram crate.

use std::fmt;

/// Errors from Bot API operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelegramError {
    /// The API answered with `ok: false`.
    Api { description: String },
    /// Transport-level failure before a response arrived.
    Transport { reason: String },
    /// The response body could not be interpreted.
    ResponseParseFailed { reason: String },
    /// A request payload could not be assembled.
    InvalidPayload { reason: String },
    /// Local file I/O failed while uploading or downloading.
    Io { reason: String },
}

impl fmt::Display for TelegramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { description } => write!(f, "telegram API error: {description}"),
            Self::Transport { reason } => write!(f, "telegram request failed: {reason}"),
            Self::ResponseParseFailed { reason } => {
                write!(f, "failed to parse telegram response: {reason}")
            }
            Self::InvalidPayload { reason } => {
                write!(f, "invalid telegram request payload: {reason}")
            }
            Self::Io { reason } => write!(f, "telegram file I/O failed: {reason}"),
        }
    }
}

impl std::error::Error for TelegramError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_description() {
        let err = TelegramError::Api {
            description: "Bad Request: chat not found".to_string(),
        };
        assert!(err.to_string().contains("chat not found"));
    }
}
