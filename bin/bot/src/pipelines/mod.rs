//! Request pipelines.
//!
//! Every pipeline follows the same shape: acquire the per-user operation
//! lock (or bounce with a "still processing" notice), emit best-effort
//! progress feedback, call the backend with bounded retry, deliver the
//! result, and let RAII guards clean up the lock and any temporary audio
//! artifacts on every exit path.

pub mod chat;
pub mod speak;
pub mod transform;

use crate::context::BotContext;
use parakeet_core::ChatId;
use parakeet_telegram::ChatAction;
use tempfile::NamedTempFile;
use tracing::debug;

/// Stages `bytes` in a temp file that is deleted when the handle drops.
pub(crate) async fn write_artifact(
    prefix: &str,
    suffix: &str,
    bytes: &[u8],
) -> std::io::Result<NamedTempFile> {
    let artifact = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile()?;
    tokio::fs::write(artifact.path(), bytes).await?;
    Ok(artifact)
}

/// Emits a progress indicator. Feedback is best-effort: failures are
/// logged and never block the pipeline.
pub(crate) async fn feedback(ctx: &BotContext, chat: ChatId, action: ChatAction) {
    if let Err(error) = ctx.telegram.send_chat_action(chat, action).await {
        debug!(%error, "progress feedback failed");
    }
}
