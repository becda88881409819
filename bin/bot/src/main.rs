use parakeet_authz::AuthzRegistry;
use parakeet_bot::config::BotConfig;
use parakeet_bot::context::{BotContext, MAX_EXCHANGES, SYSTEM_PROMPT};
use parakeet_bot::error::StartupError;
use parakeet_bot::{dispatch, verify};
use parakeet_conversation::{
    ConversationStore, OperationTracker, SessionTracker, VoiceIntentTracker,
};
use parakeet_core::{Result, RetryPolicy};
use parakeet_generation::{ChatBackend, OpenAiChatClient, OpenAiConfig};
use parakeet_synthesis::{SpeechClient, SpeechConfig};
use parakeet_telegram::TelegramClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const POLL_TIMEOUT_SECS: u32 = 50;
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(error) = run().await {
        tracing::error!(%error, "startup failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = BotConfig::from_env().map_err(|e| StartupError::Config {
        details: e.to_string(),
    })?;
    info!(
        authorized = config.authorized_user_ids.len(),
        admins = config.admin_user_ids.len(),
        generation = config.generation_enabled(),
        "configuration loaded"
    );

    let ctx = Arc::new(build_context(&config)?);
    verify::run(&ctx).await?;

    info!("startup verification passed; polling for updates");
    poll_loop(ctx).await;
    info!("shutdown signal received");
    Ok(())
}

fn build_context(config: &BotConfig) -> Result<BotContext, StartupError> {
    let authz = AuthzRegistry::new(&config.authorized_user_ids, &config.admin_user_ids);

    let telegram =
        TelegramClient::new(&config.telegram_bot_token).map_err(|e| StartupError::Platform {
            details: e.to_string(),
        })?;

    let generation: Option<Arc<dyn ChatBackend>> = match config.openai_api_key.as_deref() {
        Some(api_key) => {
            let client = OpenAiChatClient::new(OpenAiConfig::new(api_key)).map_err(|e| {
                StartupError::Generation {
                    details: e.to_string(),
                }
            })?;
            Some(Arc::new(client))
        }
        None => None,
    };

    let synthesis = SpeechClient::new(
        SpeechConfig::new(&config.elevenlabs_api_key).with_voice_id(config.voice_id()),
    )
    .map_err(|e| StartupError::Synthesis {
        details: e.to_string(),
    })?;

    Ok(BotContext {
        authz,
        history: ConversationStore::new(SYSTEM_PROMPT, MAX_EXCHANGES),
        sessions: SessionTracker::new(),
        operations: OperationTracker::new(),
        intents: VoiceIntentTracker::new(),
        telegram,
        generation,
        synthesis,
        retry: RetryPolicy::default(),
    })
}

/// Long-polls for updates until a shutdown signal arrives, spawning one
/// handler task per update so users never block each other.
async fn poll_loop(ctx: Arc<BotContext>) {
    let mut offset = 0i64;
    loop {
        let updates = tokio::select! {
            _ = tokio::signal::ctrl_c() => return,
            result = ctx.telegram.get_updates(offset, POLL_TIMEOUT_SECS) => match result {
                Ok(updates) => updates,
                Err(error) => {
                    warn!(%error, "update poll failed");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            },
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            tokio::spawn(dispatch::handle_update(Arc::clone(&ctx), update));
        }
    }
}
