//! Command parsing for the user-facing surface.
//!
//! Slash commands are split from their argument tail here; the `/speak`
//! argument tail additionally runs through an explicit tokenizer that
//! produces either a structured request or a typed parse failure.

use parakeet_synthesis::VoiceOverrides;
use std::fmt;

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start` or `/help`.
    Help,
    /// `/chat <message>` — explicit text generation.
    Chat { message: String },
    /// `/speak [flags] <text>` — the raw argument tail, tokenized
    /// separately by [`parse_speak_args`].
    Speak { args: String },
    /// `/transform` — arm the voice-transform intent.
    Transform,
    /// `/reset` — clear the conversation history.
    Reset,
    /// Any other slash command.
    Unknown { name: String },
}

impl Command {
    /// Parses a leading slash command.
    ///
    /// Returns `None` for plain text, which the dispatcher routes as an
    /// implicit chat request. A `@botname` suffix on the command token
    /// is ignored.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !text.starts_with('/') {
            return None;
        }

        let (head, rest) = match text.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (text, ""),
        };
        let name = head[1..].split('@').next().unwrap_or_default();

        Some(match name {
            "start" | "help" => Self::Help,
            "chat" => Self::Chat {
                message: rest.to_string(),
            },
            "speak" => Self::Speak {
                args: rest.to_string(),
            },
            "transform" => Self::Transform,
            "reset" => Self::Reset,
            other => Self::Unknown {
                name: other.to_string(),
            },
        })
    }
}

/// A fully tokenized `/speak` request.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakRequest {
    /// Voice parameter overrides taken from flags.
    pub overrides: VoiceOverrides,
    /// The text to synthesize.
    pub body: String,
}

/// Typed failure from the `/speak` tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakParseError {
    /// A recognized flag appeared without a following value.
    MissingValue { flag: &'static str },
    /// A recognized flag's value was not numeric.
    InvalidValue { flag: &'static str, value: String },
    /// No text remained once flags were consumed.
    EmptyBody,
}

impl fmt::Display for SpeakParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue { flag } => write!(f, "flag {flag} needs a value"),
            Self::InvalidValue { flag, value } => {
                write!(f, "flag {flag} expects a number, got '{value}'")
            }
            Self::EmptyBody => write!(f, "no text to speak"),
        }
    }
}

impl std::error::Error for SpeakParseError {}

/// Tokenizes `/speak` arguments into overrides plus the message body.
///
/// Recognized flags are `-s` (stability), `-b` (similarity boost) and
/// `-v` (speed), each taking one numeric value; every other token
/// belongs to the body, in order. Out-of-range numbers are accepted here
/// and clamped by the synthesis backend.
///
/// # Errors
///
/// Returns a typed error for a trailing flag, a non-numeric flag value,
/// or an empty body.
pub fn parse_speak_args(input: &str) -> Result<SpeakRequest, SpeakParseError> {
    let mut overrides = VoiceOverrides::default();
    let mut body: Vec<&str> = Vec::new();

    let mut tokens = input.split_whitespace();
    while let Some(token) = tokens.next() {
        let flag: &'static str = match token {
            "-s" => "-s",
            "-b" => "-b",
            "-v" => "-v",
            other => {
                body.push(other);
                continue;
            }
        };

        let value = tokens
            .next()
            .ok_or(SpeakParseError::MissingValue { flag })?;
        let parsed: f32 = value.parse().map_err(|_| SpeakParseError::InvalidValue {
            flag,
            value: value.to_string(),
        })?;

        match flag {
            "-s" => overrides.stability = Some(parsed),
            "-b" => overrides.similarity_boost = Some(parsed),
            _ => overrides.speed = Some(parsed),
        }
    }

    if body.is_empty() {
        return Err(SpeakParseError::EmptyBody);
    }

    Ok(SpeakRequest {
        overrides,
        body: body.join(" "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(Command::parse("hello there"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn help_and_start_are_equivalent() {
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("/start"), Some(Command::Help));
    }

    #[test]
    fn botname_suffix_is_stripped() {
        assert_eq!(Command::parse("/help@parakeet_bot"), Some(Command::Help));
    }

    #[test]
    fn chat_keeps_its_argument() {
        assert_eq!(
            Command::parse("/chat what's the weather?"),
            Some(Command::Chat {
                message: "what's the weather?".to_string()
            })
        );
    }

    #[test]
    fn unknown_commands_are_reported_by_name() {
        assert_eq!(
            Command::parse("/frobnicate now"),
            Some(Command::Unknown {
                name: "frobnicate".to_string()
            })
        );
    }

    #[test]
    fn speak_flags_and_body_tokenize() {
        let request = parse_speak_args(r#"-s 0.4 -v 1.1 "Hola""#).expect("parse");

        assert_eq!(request.overrides.stability, Some(0.4));
        assert_eq!(request.overrides.speed, Some(1.1));
        assert_eq!(request.overrides.similarity_boost, None);
        assert_eq!(request.body, r#""Hola""#);
    }

    #[test]
    fn speak_flags_may_interleave_with_body() {
        let request = parse_speak_args("good -b 0.9 morning").expect("parse");

        assert_eq!(request.overrides.similarity_boost, Some(0.9));
        assert_eq!(request.body, "good morning");
    }

    #[test]
    fn non_numeric_flag_value_is_a_hard_error() {
        let error = parse_speak_args(r#"-s abc "Hola""#).expect_err("should fail");

        assert_eq!(
            error,
            SpeakParseError::InvalidValue {
                flag: "-s",
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn trailing_flag_without_value_is_a_hard_error() {
        let error = parse_speak_args(r#""Hola" -s"#).expect_err("should fail");

        assert_eq!(error, SpeakParseError::MissingValue { flag: "-s" });
    }

    #[test]
    fn empty_body_is_rejected() {
        assert_eq!(parse_speak_args(""), Err(SpeakParseError::EmptyBody));
        assert_eq!(
            parse_speak_args("-s 0.5 -v 1.0"),
            Err(SpeakParseError::EmptyBody)
        );
    }

    #[test]
    fn out_of_range_values_are_not_parse_errors() {
        // Range enforcement happens by clamping at the backend, not here.
        let request = parse_speak_args("-s 42 loud").expect("parse");
        assert_eq!(request.overrides.stability, Some(42.0));
    }

    #[test]
    fn unrecognized_dash_tokens_belong_to_the_body() {
        let request = parse_speak_args("-x 1 hello").expect("parse");

        assert!(request.overrides.is_empty());
        assert_eq!(request.body, "-x 1 hello");
    }
}
