//! Session bookkeeping.
//!
//! A session is created on a user's first authorized interaction and
//! updated on every one after that. Sessions are never explicitly
//! destroyed; they live for the process lifetime.

use chrono::{DateTime, Utc};
use parakeet_core::UserId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A user's interaction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// The user this session belongs to.
    pub user_id: UserId,
    /// When the user last interacted with the bot.
    pub last_action_at: DateTime<Utc>,
}

/// Tracks one session per user.
#[derive(Debug)]
pub struct SessionTracker {
    state: Arc<Mutex<HashMap<UserId, Session>>>,
}

impl SessionTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates the session on first use and stamps the action time.
    pub fn touch(&self, user: UserId) -> Session {
        let session = Session {
            user_id: user,
            last_action_at: Utc::now(),
        };
        self.state.lock().unwrap().insert(user, session);
        session
    }

    /// Returns the session if the user has interacted before.
    #[must_use]
    pub fn get(&self, user: UserId) -> Option<Session> {
        self.state.lock().unwrap().get(&user).copied()
    }

    /// Number of users seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().len()
    }

    /// Returns true if no user has interacted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().is_empty()
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionTracker {
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
    fn touch_creates_session() {
        let tracker = SessionTracker::new();
        let user = UserId::new(1);

        assert!(tracker.get(user).is_none());

        let session = tracker.touch(user);
        assert_eq!(session.user_id, user);
        assert_eq!(tracker.get(user), Some(session));
    }

    #[test]
    fn touch_advances_last_action() {
        let tracker = SessionTracker::new();
        let user = UserId::new(1);

        let first = tracker.touch(user);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = tracker.touch(user);

        assert!(second.last_action_at > first.last_action_at);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn unseen_users_have_no_session() {
        let tracker = SessionTracker::new();
        tracker.touch(UserId::new(1));

        assert!(tracker.get(UserId::new(2)).is_none());
    }
}
