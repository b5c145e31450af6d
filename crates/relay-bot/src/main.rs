//! Anonymizing Telegram relay bot - Main entry point.

use anyhow::Context;
use blocklist_store::BlocklistStore;
use relay_bot::config::Config;
use relay_bot::error::AppResult;
use relay_bot::router::RelayRouter;
use telegram_client::{TelegramClient, UpdateReceiver};
use tokio::signal;
use tokio_stream::StreamExt;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting Telegram relay bot...");

    // Initialize clients
    let telegram = TelegramClient::new(&config.telegram.api_url, &config.telegram.bot_token)
        .context("Failed to create Telegram client")?;

    let blocklist = BlocklistStore::open(&config.storage.blocklist_path)
        .await
        .context("Failed to open blocklist store")?;

    info!("Blocklist ready ({} blocked ids)", blocklist.count().await);

    // Health check
    if !telegram.health_check().await {
        error!("Telegram API not reachable at {}", config.telegram.api_url);
        return Err(anyhow::anyhow!("Telegram API not reachable").into());
    }
    info!("Telegram API healthy");

    let router = RelayRouter::new(telegram.clone(), blocklist, &config.relay);

    info!(
        "Relaying to operator {} (command prefix '{}')",
        config.relay.operator_id, config.relay.command_prefix
    );

    // Start update receiver
    let receiver = UpdateReceiver::new(telegram, config.telegram.poll_timeout);
    let mut stream = Box::pin(receiver.stream());

    info!("Relay bot is running");

    // Main message loop
    loop {
        tokio::select! {
            Some(message) = stream.next() => {
                if let Err(e) = router.handle(&message).await {
                    // A failed relay is dropped, not retried; the loop
                    // keeps serving later events.
                    error!("Relay error: {}", e);
                }
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
