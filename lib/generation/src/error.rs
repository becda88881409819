//! Error types for the generation crate.

use std::fmt;

/// Errors from chat-completion backend operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The API rejected the configured credentials.
    Unauthorized,
    /// Rate limit exceeded.
    RateLimited,
    /// The backend rejected the request.
    Rejected { status: u16, message: String },
    /// The backend is unavailable (5xx or connection failure).
    Unavailable { reason: String },
    /// Transport-level failure before a response arrived.
    RequestFailed { reason: String },
    /// The response body could not be interpreted.
    ResponseParseFailed { reason: String },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "generation backend rejected the API key"),
            Self::RateLimited => write!(f, "generation backend rate limit exceeded"),
            Self::Rejected { status, message } => {
                write!(f, "generation request rejected (HTTP {status}): {message}")
            }
            Self::Unavailable { reason } => {
                write!(f, "generation backend unavailable: {reason}")
            }
            Self::RequestFailed { reason } => {
                write!(f, "generation request failed: {reason}")
            }
            Self::ResponseParseFailed { reason } => {
                write!(f, "failed to parse generation response: {reason}")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_includes_status() {
        let err = GenerationError::Rejected {
            status: 400,
            message: "bad request".to_string(),
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("bad request"));
    }

    #[test]
    fn parse_failure_display_includes_reason() {
        let err = GenerationError::ResponseParseFailed {
            reason: "missing choices".to_string(),
        };
        assert!(err.to_string().contains("missing choices"));
    }
}
