//! Shared bot state.
//!
//! One `BotContext` is constructed at startup and threaded through every
//! handler; there is no module-level mutable state.

use crate::error::HandlerError;
use parakeet_authz::AuthzRegistry;
use parakeet_conversation::{
    ConversationStore, OperationTracker, SessionTracker, VoiceIntentTracker,
};
use parakeet_core::{ChatId, Result, RetryPolicy, UserId};
use parakeet_generation::ChatBackend;
use parakeet_synthesis::SpeechClient;
use parakeet_telegram::TelegramClient;
use std::sync::Arc;
use tracing::debug;

/// Fixed system instruction seeding every conversation.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant chatting over Telegram. Keep replies concise and conversational.";

/// Retained user/assistant exchange pairs per conversation.
pub const MAX_EXCHANGES: usize = 10;

/// Everything an update handler needs, constructed once at startup.
pub struct BotContext {
    /// Who may talk to the bot.
    pub authz: AuthzRegistry,
    /// Per-user bounded chat history.
    pub history: ConversationStore,
    /// Per-user interaction bookkeeping.
    pub sessions: SessionTracker,
    /// Per-user exclusive operation lock.
    pub operations: OperationTracker,
    /// Per-user one-shot voice-transform intent.
    pub intents: VoiceIntentTracker,
    /// Messaging platform client.
    pub telegram: TelegramClient,
    /// Text-generation backend; `None` disables the chat pipeline.
    pub generation: Option<Arc<dyn ChatBackend>>,
    /// Voice-synthesis backend.
    pub synthesis: SpeechClient,
    /// Attempt budget shared by all backend calls.
    pub retry: RetryPolicy,
}

impl BotContext {
    /// Force-releases every per-user hold.
    ///
    /// The fault boundary's backstop: guards normally release on drop,
    /// but a wedged lock would silence the user forever, so faults clear
    /// both the operation lock and the voice intent unconditionally.
    pub fn force_clear(&self, user: UserId) {
        debug!(user = %user, "force-clearing operation lock and voice intent");
        self.operations.release(user);
        self.intents.cancel(user);
    }

    /// Sends a text reply, converting delivery failures into handler
    /// errors for the fault boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails.
    pub async fn reply(&self, chat: ChatId, text: &str) -> Result<(), HandlerError> {
        self.telegram
            .send_message(chat, text)
            .await
            .map_err(|e| HandlerError::Delivery {
                details: e.to_string(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parakeet_conversation::OperationKind;
    use parakeet_synthesis::SpeechConfig;

    fn context() -> BotContext {
        BotContext {
            authz: AuthzRegistry::new(&[UserId::new(1)], &[]),
            history: ConversationStore::new(SYSTEM_PROMPT, MAX_EXCHANGES),
            sessions: SessionTracker::new(),
            operations: OperationTracker::new(),
            intents: VoiceIntentTracker::new(),
            telegram: TelegramClient::new("123:test").expect("client"),
            generation: None,
            synthesis: SpeechClient::new(SpeechConfig::new("test-key")).expect("client"),
            retry: RetryPolicy::default(),
        }
    }

    #[test]
    fn force_clear_releases_lock_and_intent() {
        let ctx = context();
        let user = UserId::new(1);

        ctx.operations.release(user);
        let guard = ctx.operations.begin(user, OperationKind::GeneratingText);
        ctx.intents.arm(user, ChatId::new(10));

        ctx.force_clear(user);

        assert!(ctx.operations.current(user).is_none());
        assert!(!ctx.intents.is_armed(user));
        drop(guard);
    }

    #[test]
    fn force_clear_on_idle_user_is_a_no_op() {
        let ctx = context();
        ctx.force_clear(UserId::new(99));

        assert!(ctx.operations.current(UserId::new(99)).is_none());
    }

    #[test]
    fn history_capacity_matches_configured_exchanges() {
        let ctx = context();
        assert_eq!(ctx.history.capacity(), 1 + 2 * MAX_EXCHANGES);
    }
}
