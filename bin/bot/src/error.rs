//! Error types for the bot binary.

use std::fmt;

/// Errors that abort startup before the bot serves traffic.
#[derive(Debug)]
pub enum StartupError {
    /// Configuration could not be loaded.
    Config { details: String },
    /// The messaging platform rejected the bot token.
    Platform { details: String },
    /// The generation backend failed its verification call.
    Generation { details: String },
    /// The synthesis backend failed its verification call.
    Synthesis { details: String },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { details } => write!(f, "configuration error: {details}"),
            Self::Platform { details } => {
                write!(f, "platform verification failed: {details}")
            }
            Self::Generation { details } => {
                write!(f, "generation backend verification failed: {details}")
            }
            Self::Synthesis { details } => {
                write!(f, "synthesis backend verification failed: {details}")
            }
        }
    }
}

impl std::error::Error for StartupError {}

/// Errors escaping an update handler into the fault boundary.
#[derive(Debug)]
pub enum HandlerError {
    /// Outbound platform delivery failed.
    Delivery { details: String },
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivery { details } => write!(f, "reply delivery failed: {details}"),
        }
    }
}

impl std::error::Error for HandlerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_error_display_names_the_layer() {
        let err = StartupError::Synthesis {
            details: "subscription lookup failed".to_string(),
        };
        assert!(err.to_string().contains("synthesis"));
        assert!(err.to_string().contains("subscription lookup failed"));
    }

    #[test]
    fn handler_error_display_includes_details() {
        let err = HandlerError::Delivery {
            details: "chat not found".to_string(),
        };
        assert!(err.to_string().contains("chat not found"));
    }
}
