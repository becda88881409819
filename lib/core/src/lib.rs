//! Core domain types and utilities for the parakeet relay bot.
//!
//! This crate provides the foundational types, error handling, and the
//! shared retry primitive used throughout parakeet.

pub mod error;
pub mod id;
pub mod retry;

pub use error::Result;
pub use id::{ChatId, ParseIdError, RequestId, UserId};
pub use retry::{RetryPolicy, retry_with_backoff};
