//! Startup verification.
//!
//! Confirms the platform token and both backends are usable before the
//! bot serves traffic. Any failure here aborts startup.

use crate::context::BotContext;
use crate::error::StartupError;
use parakeet_core::Result;
use tracing::{info, warn};

/// Runs the verification pass against every configured collaborator.
///
/// # Errors
///
/// Returns an error if the platform token, the generation backend (when
/// configured), or the synthesis backend fails its check.
pub async fn run(ctx: &BotContext) -> Result<(), StartupError> {
    let me = ctx
        .telegram
        .get_me()
        .await
        .map_err(|e| StartupError::Platform {
            details: e.to_string(),
        })?;
    info!(
        bot = me.username.as_deref().unwrap_or(me.first_name.as_str()),
        "platform token verified"
    );

    match ctx.generation.as_ref() {
        Some(backend) => {
            backend
                .verify()
                .await
                .map_err(|e| StartupError::Generation {
                    details: e.to_string(),
                })?;
            info!(model = backend.model(), "generation backend verified");
        }
        None => {
            warn!("generation backend not configured; text generation is disabled");
        }
    }

    let subscription = ctx
        .synthesis
        .subscription()
        .await
        .map_err(|e| StartupError::Synthesis {
            details: e.to_string(),
        })?;
    info!(
        tier = %subscription.tier,
        used = subscription.character_count,
        limit = subscription.character_limit,
        "synthesis subscription verified"
    );

    ctx.synthesis
        .verify_voice()
        .await
        .map_err(|e| StartupError::Synthesis {
            details: e.to_string(),
        })?;
    info!(voice = %ctx.synthesis.voice_id(), "voice verified");

    Ok(())
}
