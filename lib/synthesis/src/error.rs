//! Error types for the synthesis crate.

use std::fmt;

/// Errors from voice-synthesis backend operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// The API rejected the configured credentials.
    InvalidApiKey,
    /// Rate limit or quota exceeded.
    RateLimited,
    /// The backend rejected the request.
    Rejected { status: u16, message: String },
    /// The backend is unavailable (5xx or connection failure).
    Unavailable { reason: String },
    /// Transport-level failure before a response arrived.
    RequestFailed { reason: String },
    /// The response body could not be interpreted.
    ResponseParseFailed { reason: String },
    /// The configured voice does not exist.
    VoiceNotFound { voice_id: String },
    /// A source audio artifact could not be read.
    AudioUnreadable { path: String, reason: String },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidApiKey => write!(f, "synthesis backend rejected the API key"),
            Self::RateLimited => write!(f, "synthesis backend rate limit exceeded"),
            Self::Rejected { status, message } => {
                write!(f, "synthesis request rejected (HTTP {status}): {message}")
            }
            Self::Unavailable { reason } => {
                write!(f, "synthesis backend unavailable: {reason}")
            }
            Self::RequestFailed { reason } => {
                write!(f, "synthesis request failed: {reason}")
            }
            Self::ResponseParseFailed { reason } => {
                write!(f, "failed to parse synthesis response: {reason}")
            }
            Self::VoiceNotFound { voice_id } => {
                write!(f, "voice '{voice_id}' does not exist")
            }
            Self::AudioUnreadable { path, reason } => {
                write!(f, "could not read audio at '{path}': {reason}")
            }
        }
    }
}

impl std::error::Error for SynthesisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_not_found_names_the_voice() {
        let err = SynthesisError::VoiceNotFound {
            voice_id: "abc123".to_string(),
        };
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn audio_unreadable_names_the_path() {
        let err = SynthesisError::AudioUnreadable {
            path: "/tmp/in.ogg".to_string(),
            reason: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("/tmp/in.ogg"));
        assert!(err.to_string().contains("permission denied"));
    }
}
