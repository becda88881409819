//! Per-user exclusive operation lock.
//!
//! At most one long-running pipeline may be in flight per user.
//! Acquisition hands back an RAII guard; dropping the guard releases the
//! lock, so success, error, and unwind paths all release without extra
//! bookkeeping. `release` stays available as an explicit backstop for
//! the fault boundary.

use parakeet_core::UserId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// The kind of long-running work a user has in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Waiting on the text-generation backend.
    GeneratingText,
    /// Waiting on the text-to-speech backend.
    SynthesizingSpeech,
    /// Waiting on the speech-to-speech backend.
    TransformingVoice,
}

impl OperationKind {
    /// Short human-readable label for user notices.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::GeneratingText => "generating a reply",
            Self::SynthesizingSpeech => "converting text to speech",
            Self::TransformingVoice => "transforming a voice message",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

type OperationMap = Arc<Mutex<HashMap<UserId, OperationKind>>>;

/// Tracks the pending operation per user.
#[derive(Debug)]
pub struct OperationTracker {
    state: OperationMap,
}

impl OperationTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Attempts to begin `kind` for the user.
    ///
    /// The check and the insert happen under a single lock acquisition,
    /// so two racing calls can never both succeed. Returns `None` when
    /// an operation is already pending.
    #[must_use]
    pub fn begin(&self, user: UserId, kind: OperationKind) -> Option<OperationGuard> {
        let mut state = self.state.lock().unwrap();
        if state.contains_key(&user) {
            return None;
        }
        state.insert(user, kind);

        Some(OperationGuard {
            user,
            state: Arc::clone(&self.state),
        })
    }

    /// The operation currently pending for the user, if any.
    #[must_use]
    pub fn current(&self, user: UserId) -> Option<OperationKind> {
        self.state.lock().unwrap().get(&user).copied()
    }

    /// Releases the user's lock; a no-op when nothing is pending.
    pub fn release(&self, user: UserId) {
        self.state.lock().unwrap().remove(&user);
    }
}

impl Default for OperationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for OperationTracker {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

/// RAII handle for a pending operation; dropping it releases the lock.
#[derive(Debug)]
pub struct OperationGuard {
    user: UserId,
    state: OperationMap,
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.remove(&self.user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_records_operation() {
        let tracker = OperationTracker::new();
        let user = UserId::new(1);

        let guard = tracker.begin(user, OperationKind::GeneratingText);
        assert!(guard.is_some());
        assert_eq!(tracker.current(user), Some(OperationKind::GeneratingText));
    }

    #[test]
    fn second_begin_is_refused_while_held() {
        let tracker = OperationTracker::new();
        let user = UserId::new(1);

        let _guard = tracker.begin(user, OperationKind::GeneratingText);

        assert!(tracker.begin(user, OperationKind::SynthesizingSpeech).is_none());
        assert_eq!(tracker.current(user), Some(OperationKind::GeneratingText));
    }

    #[test]
    fn users_do_not_block_each_other() {
        let tracker = OperationTracker::new();

        let _a = tracker.begin(UserId::new(1), OperationKind::GeneratingText);
        let b = tracker.begin(UserId::new(2), OperationKind::TransformingVoice);

        assert!(b.is_some());
    }

    #[test]
    fn dropping_guard_releases_lock() {
        let tracker = OperationTracker::new();
        let user = UserId::new(1);

        {
            let _guard = tracker.begin(user, OperationKind::SynthesizingSpeech);
            assert!(tracker.current(user).is_some());
        }

        assert!(tracker.current(user).is_none());
        assert!(tracker.begin(user, OperationKind::GeneratingText).is_some());
    }

    #[test]
    fn guard_releases_on_unwind() {
        let tracker = OperationTracker::new();
        let user = UserId::new(1);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = tracker.begin(user, OperationKind::TransformingVoice);
            panic!("pipeline blew up");
        }));

        assert!(result.is_err());
        assert!(tracker.current(user).is_none());
    }

    #[test]
    fn release_is_idempotent() {
        let tracker = OperationTracker::new();
        let user = UserId::new(1);

        tracker.release(user);

        let guard = tracker.begin(user, OperationKind::GeneratingText);
        tracker.release(user);
        tracker.release(user);
        assert!(tracker.current(user).is_none());

        drop(guard);
        assert!(tracker.begin(user, OperationKind::GeneratingText).is_some());
    }

    #[test]
    fn kinds_describe_themselves() {
        assert_eq!(
            OperationKind::GeneratingText.to_string(),
            "generating a reply"
        );
        assert_eq!(
            OperationKind::TransformingVoice.to_string(),
            "transforming a voice message"
        );
    }
}
