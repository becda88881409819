//! Text-generation pipeline.

use crate::context::BotContext;
use crate::error::HandlerError;
use crate::pipelines::feedback;
use crate::replies;
use parakeet_conversation::{ChatMessage, OperationKind};
use parakeet_core::{ChatId, RequestId, Result, UserId, retry_with_backoff};
use parakeet_telegram::ChatAction;
use tracing::{info, warn};

/// Runs one chat-completion exchange for the user.
///
/// The user's message is appended to history before the backend call; on
/// success the assistant reply is appended and delivered, on failure a
/// human-readable notice is delivered and the history is left as it is.
///
/// # Errors
///
/// Returns an error only when reply delivery itself fails.
pub async fn run(
    ctx: &BotContext,
    user: UserId,
    chat: ChatId,
    text: &str,
) -> Result<(), HandlerError> {
    let Some(backend) = ctx.generation.as_ref() else {
        return ctx.reply(chat, replies::GENERATION_DISABLED).await;
    };

    let Some(_guard) = ctx.operations.begin(user, OperationKind::GeneratingText) else {
        let kind = ctx
            .operations
            .current(user)
            .unwrap_or(OperationKind::GeneratingText);
        return ctx.reply(chat, &replies::busy(kind)).await;
    };

    let request_id = RequestId::new();
    info!(%request_id, user = %user, "chat pipeline started");
    feedback(ctx, chat, ChatAction::Typing).await;

    ctx.history.append(user, ChatMessage::user(text));
    let messages = ctx.history.get(user);

    let result = retry_with_backoff(ctx.retry, "chat-completion", || backend.complete(&messages))
        .await;

    match result {
        Ok(reply) => {
            ctx.history.append(user, ChatMessage::assistant(reply.clone()));
            info!(%request_id, user = %user, chars = reply.len(), "chat pipeline finished");
            ctx.reply(chat, &reply).await
        }
        Err(error) => {
            // The user's message stays in history; only the reply is
            // missing. The exchange is not retried beyond the backend
            // retry budget.
            warn!(%request_id, user = %user, %error, "text generation failed");
            ctx.reply(chat, replies::GENERATION_FAILED).await
        }
    }
}
