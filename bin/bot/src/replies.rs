//! User-facing reply text.
//!
//! Everything shown to end users lives here: short, human-readable copy
//! with no internal detail. Stack traces and backend errors are logged,
//! never sent.

use parakeet_conversation::OperationKind;

use crate::commands::SpeakParseError;

/// Help text for `/start` and `/help`.
pub const HELP: &str = "\
Hi! I relay your messages to a language model and a voice synthesizer.

/chat <message> — ask the language model (plain text works too)
/speak [-s stability] [-b similarity] [-v speed] <text> — read text aloud
/transform — send a voice message next and I'll re-voice it
/reset — forget our conversation so far
/help — show this message";

/// Rejection for users outside the allow-list.
pub const UNAUTHORIZED: &str = "Sorry, you are not allowed to use this bot.";

/// Notice when the generation backend is not configured.
pub const GENERATION_DISABLED: &str =
    "Text generation is not configured on this instance. Voice commands still work.";

/// Confirmation after arming the voice-transform intent.
pub const TRANSFORM_ARMED: &str = "Send me a voice message and I'll re-voice it.";

/// Reminder when `/transform` is issued while already armed.
pub const TRANSFORM_ALREADY_ARMED: &str = "I'm already waiting for your voice message.";

/// Notice when a non-audio message cancels the pending intent.
pub const TRANSFORM_CANCELLED: &str =
    "That wasn't a voice message, so I'll stop waiting for one.";

/// Hint for audio that arrives with no armed intent.
pub const UNSOLICITED_AUDIO: &str =
    "If you want me to re-voice audio, send /transform first.";

/// Confirmation after a conversation reset.
pub const RESET_DONE: &str = "Conversation cleared. We're starting fresh.";

/// Failure notice for the chat pipeline.
pub const GENERATION_FAILED: &str =
    "I couldn't get a reply from the language model. Please try again later.";

/// Failure notice for the text-to-speech pipeline.
pub const SYNTHESIS_FAILED: &str = "Voice synthesis failed. Please try again later.";

/// Failure notice for the speech-to-speech pipeline.
pub const TRANSFORM_FAILED: &str =
    "I couldn't transform that voice message. Please try again later.";

/// Generic notice from the fault boundary.
pub const FAULT: &str = "Something went wrong on my side. Please try again.";

/// Usage hint for an empty `/chat`.
pub const CHAT_USAGE: &str = "Usage: /chat <message>";

/// Notice while a previous operation is still running.
#[must_use]
pub fn busy(kind: OperationKind) -> String {
    format!("Hold on — I'm still {kind}. Please wait for that to finish.")
}

/// Usage hint for a malformed `/speak`.
#[must_use]
pub fn speak_usage(error: &SpeakParseError) -> String {
    format!("{error}\nUsage: /speak [-s stability] [-b similarity] [-v speed] <text>")
}

/// Notice for an unrecognized command.
#[must_use]
pub fn unknown_command(name: &str) -> String {
    format!("I don't know /{name}. Try /help for the list of commands.")
}

/// Extra `/help` footer shown to admins.
#[must_use]
pub fn admin_footer(model: Option<&str>, voice_id: &str) -> String {
    format!(
        "\n\nAdmin: model {}, voice {voice_id}",
        model.unwrap_or("disabled")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_notice_describes_the_operation() {
        let notice = busy(OperationKind::SynthesizingSpeech);
        assert!(notice.contains("converting text to speech"));
    }

    #[test]
    fn speak_usage_carries_the_parse_error() {
        let notice = speak_usage(&SpeakParseError::EmptyBody);
        assert!(notice.contains("/speak"));
        assert!(notice.contains("no text to speak"));
    }

    #[test]
    fn admin_footer_handles_disabled_generation() {
        let footer = admin_footer(None, "voice-1");
        assert!(footer.contains("disabled"));
        assert!(footer.contains("voice-1"));
    }
}
