//! Telegram Bot API client for parakeet.
//!
//! A thin wrapper over the handful of Bot API methods the relay needs:
//! long-poll updates, text and voice replies, chat actions, and file
//! downloads. Only the fields parakeet reads are modeled.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatAction, TelegramClient};
pub use error::TelegramError;
pub use types::{ApiResponse, Audio, Chat, FileInfo, Message, Update, User, Voice};
