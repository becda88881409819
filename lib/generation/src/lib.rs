//! Text-generation backend for parakeet.
//!
//! Provides the chat-completion abstraction and its OpenAI-compatible
//! implementation. The backend is optional at runtime: when no API key
//! is configured, every entry point that would use it is disabled and
//! answers with a capability notice instead.

pub mod backend;
pub mod error;
pub mod openai;

pub use backend::ChatBackend;
pub use error::GenerationError;
pub use openai::{OpenAiChatClient, OpenAiConfig};
