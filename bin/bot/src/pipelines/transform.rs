//! Speech-to-speech pipeline.
//!
//! The dispatcher consumes the voice intent before calling into this
//! module, so rapidly arriving follow-up audio can never trigger the
//! pipeline twice.

use crate::context::BotContext;
use crate::error::HandlerError;
use crate::pipelines::{feedback, write_artifact};
use crate::replies;
use parakeet_conversation::OperationKind;
use parakeet_core::{ChatId, RequestId, Result, UserId, retry_with_backoff};
use parakeet_telegram::{ChatAction, Message, TelegramError};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Downloads the message's audio, re-voices it, and delivers the result
/// as a voice message. Both the downloaded input and the produced output
/// live in temp files that are deleted when this function returns,
/// regardless of outcome.
///
/// # Errors
///
/// Returns an error only when reply delivery itself fails.
pub async fn run(
    ctx: &BotContext,
    user: UserId,
    chat: ChatId,
    message: &Message,
) -> Result<(), HandlerError> {
    let Some(_guard) = ctx.operations.begin(user, OperationKind::TransformingVoice) else {
        let kind = ctx
            .operations
            .current(user)
            .unwrap_or(OperationKind::TransformingVoice);
        return ctx.reply(chat, &replies::busy(kind)).await;
    };

    let request_id = RequestId::new();
    info!(%request_id, user = %user, "transform pipeline started");
    feedback(ctx, chat, ChatAction::RecordVoice).await;

    let Some(file_id) = message.audio_file_id() else {
        // The dispatcher only routes audio here; a message without an
        // attachment means the platform sent something we cannot use.
        warn!(%request_id, user = %user, "transform requested without an audio attachment");
        return ctx.reply(chat, replies::TRANSFORM_FAILED).await;
    };

    let input = match download_input(ctx, file_id).await {
        Ok(input) => input,
        Err(error) => {
            warn!(%request_id, user = %user, %error, "source audio download failed");
            return ctx.reply(chat, replies::TRANSFORM_FAILED).await;
        }
    };

    let transformed = retry_with_backoff(ctx.retry, "speech-to-speech", || {
        ctx.synthesis.speech_to_speech(input.path())
    })
    .await;

    let audio = match transformed {
        Ok(audio) => audio,
        Err(error) => {
            warn!(%request_id, user = %user, %error, "speech-to-speech failed");
            return ctx.reply(chat, replies::TRANSFORM_FAILED).await;
        }
    };

    let output = match write_artifact("parakeet-sts-", ".mp3", &audio).await {
        Ok(output) => output,
        Err(error) => {
            warn!(%request_id, user = %user, %error, "failed to stage transformed audio");
            return ctx.reply(chat, replies::TRANSFORM_FAILED).await;
        }
    };

    match ctx
        .telegram
        .send_voice(chat, output.path(), "transformed.mp3")
        .await
    {
        Ok(_) => {
            info!(%request_id, user = %user, bytes = audio.len(), "transform pipeline finished");
            Ok(())
        }
        Err(error) => {
            // Both artifacts are still deleted when they drop below.
            warn!(%request_id, user = %user, %error, "voice delivery failed");
            ctx.reply(chat, replies::TRANSFORM_FAILED).await
        }
    }
}

/// Downloads the source audio into a temp file owned by this pipeline
/// invocation.
async fn download_input(
    ctx: &BotContext,
    file_id: &str,
) -> Result<NamedTempFile, TelegramError> {
    let info = ctx.telegram.get_file(file_id).await?;
    let Some(file_path) = info.file_path else {
        return Err(TelegramError::ResponseParseFailed {
            reason: "file metadata carried no download path".to_string(),
        }
        .into());
    };

    let artifact = tempfile::Builder::new()
        .prefix("parakeet-voice-")
        .suffix(".oga")
        .tempfile()
        .map_err(|e| TelegramError::Io {
            reason: e.to_string(),
        })?;

    ctx.telegram
        .download_file(&file_path, artifact.path())
        .await?;

    Ok(artifact)
}
