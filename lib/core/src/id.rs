//! Strongly-typed identifiers.
//!
//! Telegram assigns integer identifiers to users and chats; those are
//! wrapped in newtypes so the two can never be confused. Identifiers the
//! bot generates itself use ULID for uniqueness plus temporal ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an identifier from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of identifier that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to generate a newtype around a platform-assigned integer id.
macro_rules! define_platform_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw platform identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw platform value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        reason: e.to_string(),
                    })
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_platform_id!(
    /// Platform-assigned identifier for a user.
    UserId
);

define_platform_id!(
    /// Platform-assigned identifier for a chat.
    ChatId
);

/// Unique identifier for one pipeline invocation, used to correlate log
/// lines across a request's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Ulid);

impl RequestId {
    /// Creates a new request ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_roundtrips_through_i64() {
        let id = UserId::new(123_456_789);
        assert_eq!(id.as_i64(), 123_456_789);
        assert_eq!(i64::from(id), 123_456_789);
    }

    #[test]
    fn user_id_parses_from_str() {
        let id: UserId = " 42 ".parse().expect("should parse");
        assert_eq!(id, UserId::new(42));
    }

    #[test]
    fn user_id_rejects_garbage() {
        let err = "not-a-number".parse::<UserId>().expect_err("should fail");
        assert_eq!(err.id_type, "UserId");
    }

    #[test]
    fn chat_and_user_ids_are_distinct_types() {
        // Same raw value, different meaning; equality is only defined
        // within a type.
        let user = UserId::new(7);
        let chat = ChatId::new(7);
        assert_eq!(user.as_i64(), chat.as_i64());
    }

    #[test]
    fn request_id_display_is_prefixed() {
        let id = RequestId::new();
        assert!(id.to_string().starts_with("req_"));
    }
}
