//! Chat-completion backend abstraction.

use crate::error::GenerationError;
use async_trait::async_trait;
use parakeet_conversation::ChatMessage;
use rootcause::prelude::Report;

/// Trait for chat-completion backends.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Generates the assistant reply for the given history.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion call fails.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Report<GenerationError>>;

    /// Issues a trivial completion to confirm the backend is reachable
    /// and the credentials are valid. Used during startup verification.
    ///
    /// # Errors
    ///
    /// Returns an error if the verification call fails.
    async fn verify(&self) -> Result<(), Report<GenerationError>>;

    /// Returns the model identifier requests are made with.
    fn model(&self) -> &str;
}
