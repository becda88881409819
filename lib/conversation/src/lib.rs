//! Per-user conversational state for parakeet.
//!
//! Everything in this crate is in-memory and lives for the process
//! lifetime: the bounded chat history sent to the generation backend,
//! session bookkeeping, the per-user exclusive operation lock, and the
//! one-shot voice-transform intent.
//!
//! The trackers share a common shape: a handle around an
//! `Arc<Mutex<HashMap>>` that clones cheaply and mutates only under a
//! single short lock acquisition, never across an await point.

pub mod history;
pub mod intent;
pub mod message;
pub mod operation;
pub mod session;

pub use history::ConversationStore;
pub use intent::VoiceIntentTracker;
pub use message::{ChatMessage, Role};
pub use operation::{OperationGuard, OperationKind, OperationTracker};
pub use session::{Session, SessionTracker};
