//! Bounded per-user conversation history.

use crate::message::ChatMessage;
use parakeet_core::UserId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Per-user message history for the generation backend.
///
/// Every history starts with the fixed system instruction and never
/// grows beyond `1 + 2 * max_exchanges` entries; once the cap is
/// exceeded the oldest entries after the system instruction are evicted
/// first. Index 0 is never evicted.
#[derive(Debug)]
pub struct ConversationStore {
    system_prompt: String,
    max_exchanges: usize,
    state: Arc<Mutex<HashMap<UserId, Vec<ChatMessage>>>>,
}

impl ConversationStore {
    /// Creates an empty store seeding new histories with `system_prompt`
    /// and retaining up to `max_exchanges` user/assistant pairs.
    #[must_use]
    pub fn new(system_prompt: impl Into<String>, max_exchanges: usize) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            max_exchanges,
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Maximum number of entries a history may hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        1 + 2 * self.max_exchanges
    }

    /// Returns the user's history, seeding it with the system instruction
    /// on first use. Never returns an empty sequence.
    #[must_use]
    pub fn get(&self, user: UserId) -> Vec<ChatMessage> {
        let mut state = self.state.lock().unwrap();
        state
            .entry(user)
            .or_insert_with(|| vec![ChatMessage::system(&self.system_prompt)])
            .clone()
    }

    /// Appends an entry and enforces the cap by evicting the oldest
    /// entries after the system instruction.
    pub fn append(&self, user: UserId, message: ChatMessage) {
        let cap = self.capacity();
        let mut state = self.state.lock().unwrap();
        let history = state
            .entry(user)
            .or_insert_with(|| vec![ChatMessage::system(&self.system_prompt)]);

        history.push(message);
        while history.len() > cap {
            history.remove(1);
        }
    }

    /// Drops the user's history entirely; the next `get` reseeds it.
    /// Resetting a user with no history is a no-op.
    pub fn reset(&self, user: UserId) {
        self.state.lock().unwrap().remove(&user);
    }

    /// Returns true if the user currently has a history.
    #[must_use]
    pub fn contains(&self, user: UserId) -> bool {
        self.state.lock().unwrap().contains_key(&user)
    }

    /// Number of entries currently held for the user; 0 if never seeded.
    #[must_use]
    pub fn entry_count(&self, user: UserId) -> usize {
        self.state
            .lock()
            .unwrap()
            .get(&user)
            .map_or(0, Vec::len)
    }
}

impl Clone for ConversationStore {
    fn clone(&self) -> Self {
        Self {
            system_prompt: self.system_prompt.clone(),
            max_exchanges: self.max_exchanges,
            state: Arc::clone(&self.state),
        }
    }
}
