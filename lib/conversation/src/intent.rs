//! One-shot voice-transform intent.
//!
//! Arming records that the user's next audio message should be routed to
//! the transform pipeline. The intent is consumed or cancelled by the
//! very next message; it is never held across more than one.

use parakeet_core::{ChatId, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Tracks which users have earmarked their next audio message for
/// transformation.
#[derive(Debug)]
pub struct VoiceIntentTracker {
    state: Arc<Mutex<HashMap<UserId, ChatId>>>,
}

impl VoiceIntentTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Arms the intent, remembering the chat it was issued from.
    ///
    /// Returns false when one is already armed, leaving the existing
    /// intent in place.
    pub fn arm(&self, user: UserId, chat: ChatId) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.contains_key(&user) {
            return false;
        }
        state.insert(user, chat);
        true
    }

    /// Consumes the intent, returning the arming chat.
    ///
    /// Removal happens under the lock, so of several racing audio
    /// messages exactly one can obtain the intent.
    #[must_use]
    pub fn take(&self, user: UserId) -> Option<ChatId> {
        self.state.lock().unwrap().remove(&user)
    }

    /// Cancels a pending intent; a no-op when none is armed.
    pub fn cancel(&self, user: UserId) {
        self.state.lock().unwrap().remove(&user);
    }

    /// Returns true when the user's next audio message is spoken for.
    #[must_use]
    pub fn is_armed(&self, user: UserId) -> bool {
        self.state.lock().unwrap().contains_key(&user)
    }
}

impl Default for VoiceIntentTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for VoiceIntentTracker {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_then_take_consumes_once() {
        let tracker = VoiceIntentTracker::new();
        let user = UserId::new(1);
        let chat = ChatId::new(10);

        assert!(tracker.arm(user, chat));
        assert!(tracker.is_armed(user));

        // First audio message wins; the second finds nothing.
        assert_eq!(tracker.take(user), Some(chat));
        assert_eq!(tracker.take(user), None);
        assert!(!tracker.is_armed(user));
    }

    #[test]
    fn re_arming_is_refused() {
        let tracker = VoiceIntentTracker::new();
        let user = UserId::new(1);

        assert!(tracker.arm(user, ChatId::new(10)));
        assert!(!tracker.arm(user, ChatId::new(20)));

        // The original intent is untouched.
        assert_eq!(tracker.take(user), Some(ChatId::new(10)));
    }

    #[test]
    fn cancel_clears_without_fuss() {
        let tracker = VoiceIntentTracker::new();
        let user = UserId::new(1);

        tracker.cancel(user);
        assert!(!tracker.is_armed(user));

        tracker.arm(user, ChatId::new(10));
        tracker.cancel(user);
        assert!(!tracker.is_armed(user));
        assert_eq!(tracker.take(user), None);
    }

    #[test]
    fn intents_are_per_user() {
        let tracker = VoiceIntentTracker::new();

        tracker.arm(UserId::new(1), ChatId::new(10));

        assert!(!tracker.is_armed(UserId::new(2)));
        assert_eq!(tracker.take(UserId::new(2)), None);
        assert!(tracker.is_armed(UserId::new(1)));
    }
}
