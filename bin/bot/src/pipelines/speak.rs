//! Text-to-speech pipeline.

use crate::commands::SpeakRequest;
use crate::context::BotContext;
use crate::error::HandlerError;
use crate::pipelines::{feedback, write_artifact};
use crate::replies;
use parakeet_conversation::OperationKind;
use parakeet_core::{ChatId, RequestId, Result, UserId, retry_with_backoff};
use parakeet_synthesis::VoiceSettings;
use parakeet_telegram::ChatAction;
use tracing::{info, warn};

/// Renders the request body as speech and delivers it as a voice
/// message. The rendered artifact lives in a temp file that is deleted
/// when this function returns, on every path.
///
/// # Errors
///
/// Returns an error only when reply delivery itself fails.
pub async fn run(
    ctx: &BotContext,
    user: UserId,
    chat: ChatId,
    request: &SpeakRequest,
) -> Result<(), HandlerError> {
    let Some(_guard) = ctx.operations.begin(user, OperationKind::SynthesizingSpeech) else {
        let kind = ctx
            .operations
            .current(user)
            .unwrap_or(OperationKind::SynthesizingSpeech);
        return ctx.reply(chat, &replies::busy(kind)).await;
    };

    let request_id = RequestId::new();
    info!(%request_id, user = %user, chars = request.body.len(), "speak pipeline started");
    feedback(ctx, chat, ChatAction::RecordVoice).await;

    let settings = VoiceSettings::default().with_overrides(&request.overrides);
    let rendered = retry_with_backoff(ctx.retry, "text-to-speech", || {
        ctx.synthesis.text_to_speech(&request.body, &settings)
    })
    .await;

    let audio = match rendered {
        Ok(audio) => audio,
        Err(error) => {
            warn!(%request_id, user = %user, %error, "text-to-speech failed");
            return ctx.reply(chat, replies::SYNTHESIS_FAILED).await;
        }
    };

    let artifact = match write_artifact("parakeet-tts-", ".mp3", &audio).await {
        Ok(artifact) => artifact,
        Err(error) => {
            warn!(%request_id, user = %user, %error, "failed to stage rendered audio");
            return ctx.reply(chat, replies::SYNTHESIS_FAILED).await;
        }
    };

    match ctx
        .telegram
        .send_voice(chat, artifact.path(), "speech.mp3")
        .await
    {
        Ok(_) => {
            info!(%request_id, user = %user, bytes = audio.len(), "speak pipeline finished");
            Ok(())
        }
        Err(error) => {
            // The artifact is still deleted when it drops below.
            warn!(%request_id, user = %user, %error, "voice delivery failed");
            ctx.reply(chat, replies::SYNTHESIS_FAILED).await
        }
    }
}
