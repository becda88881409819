//! Inbound update routing.
//!
//! One update flows through here end to end: authorization gate, session
//! touch, the voice-intent state machine, and finally the pipeline (or
//! notice) the message calls for. The whole handler runs inside a fault
//! boundary: a panic or an escaped error produces a generic notice and
//! force-clears the user's operation lock and voice intent so one
//! failure can never permanently wedge a user.

use crate::commands::{Command, parse_speak_args};
use crate::context::BotContext;
use crate::error::HandlerError;
use crate::pipelines;
use crate::replies;
use parakeet_core::{ChatId, Result, UserId};
use parakeet_telegram::{Message, Update};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Handles one update end to end, including the fault boundary.
pub async fn handle_update(ctx: Arc<BotContext>, update: Update) {
    let Some(message) = update.message else {
        return;
    };
    // Channel posts and service messages carry no sender; nothing to do.
    let Some(sender) = message.from.as_ref() else {
        return;
    };
    let user = UserId::new(sender.id);
    let chat = ChatId::new(message.chat.id);

    if !ctx.authz.is_authorized(user) {
        debug!(user = %user, "rejecting unauthorized user");
        if let Err(error) = ctx.telegram.send_message(chat, replies::UNAUTHORIZED).await {
            warn!(user = %user, %error, "failed to deliver rejection notice");
        }
        return;
    }

    ctx.sessions.touch(user);

    let handler = tokio::spawn(process_message(Arc::clone(&ctx), user, chat, message));
    match handler.await {
        Ok(Ok(())) => {}
        Ok(Err(fault)) => {
            error!(user = %user, %fault, "update handling failed");
            recover(&ctx, user, chat).await;
        }
        Err(join_error) => {
            error!(user = %user, %join_error, "update handler panicked");
            recover(&ctx, user, chat).await;
        }
    }
}

/// The fault boundary's recovery path: clear the user's holds and let
/// them know something broke, without detail.
async fn recover(ctx: &BotContext, user: UserId, chat: ChatId) {
    ctx.force_clear(user);
    if let Err(error) = ctx.telegram.send_message(chat, replies::FAULT).await {
        warn!(user = %user, %error, "failed to deliver fault notice");
    }
}

/// Routes an authorized message to the right pipeline or notice.
async fn process_message(
    ctx: Arc<BotContext>,
    user: UserId,
    chat: ChatId,
    message: Message,
) -> Result<(), HandlerError> {
    // Audio first: it either consumes a pending intent or is unsolicited.
    if message.has_audio() {
        if ctx.intents.take(user).is_some() {
            return pipelines::transform::run(&ctx, user, chat, &message).await;
        }
        return ctx.reply(chat, replies::UNSOLICITED_AUDIO).await;
    }

    let text = message.text.as_deref().unwrap_or_default();
    let command = Command::parse(text);

    // A pending intent survives only a repeated /transform; any other
    // non-audio input cancels it and nothing else runs.
    if !matches!(command, Some(Command::Transform)) && ctx.intents.take(user).is_some() {
        debug!(user = %user, "voice intent cancelled by non-audio input");
        return ctx.reply(chat, replies::TRANSFORM_CANCELLED).await;
    }

    match command {
        Some(Command::Transform) => {
            // Issuing /transform while an operation runs is rejected
            // without touching the intent; re-issuing while armed leaves
            // the existing intent in place.
            if let Some(kind) = ctx.operations.current(user) {
                return ctx.reply(chat, &replies::busy(kind)).await;
            }
            if !ctx.intents.arm(user, chat) {
                return ctx.reply(chat, replies::TRANSFORM_ALREADY_ARMED).await;
            }
            ctx.reply(chat, replies::TRANSFORM_ARMED).await
        }
        Some(Command::Help) => {
            let mut help = replies::HELP.to_string();
            if ctx.authz.is_admin(user) {
                let model = ctx.generation.as_ref().map(|backend| backend.model());
                help.push_str(&replies::admin_footer(model, ctx.synthesis.voice_id()));
            }
            ctx.reply(chat, &help).await
        }
        Some(Command::Chat { message }) => {
            if message.is_empty() {
                return ctx.reply(chat, replies::CHAT_USAGE).await;
            }
            pipelines::chat::run(&ctx, user, chat, &message).await
        }
        Some(Command::Speak { args }) => match parse_speak_args(&args) {
            Ok(request) => pipelines::speak::run(&ctx, user, chat, &request).await,
            Err(parse_error) => {
                // Rejected before any backend call.
                debug!(user = %user, %parse_error, "speak arguments rejected");
                ctx.reply(chat, &replies::speak_usage(&parse_error)).await
            }
        },
        Some(Command::Reset) => {
            // Idempotent: resetting an empty store changes nothing and
            // creates nothing.
            ctx.history.reset(user);
            ctx.reply(chat, replies::RESET_DONE).await
        }
        Some(Command::Unknown { name }) => {
            ctx.reply(chat, &replies::unknown_command(&name)).await
        }
        None => {
            if text.trim().is_empty() {
                // Stickers, photos, and other payloads we don't relay.
                return Ok(());
            }
            pipelines::chat::run(&ctx, user, chat, text).await
        }
    }
}
