//! Voice-synthesis backend for parakeet.
//!
//! Wraps the ElevenLabs REST API: text-to-speech, speech-to-speech, and
//! the account/voice lookups used during startup verification. Voice
//! parameters outside their valid ranges are clamped, not rejected.

pub mod client;
pub mod error;
pub mod settings;

pub use client::{DEFAULT_VOICE_ID, SpeechClient, SpeechConfig, SubscriptionInfo};
pub use error::SynthesisError;
pub use settings::{VoiceOverrides, VoiceSettings};
