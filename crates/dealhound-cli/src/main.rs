//! Dealhound entry point.
//!
//! Wires the collaborators together and runs the update loop: credentials
//! come from the environment and are required up front, tuning knobs from
//! config.toml, and the price watcher runs on its own background task.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use dealhound_application::{BotService, WatcherService};
use dealhound_core::catalog::CatalogSearch;
use dealhound_core::command::bot_commands;
use dealhound_core::session::SessionStore;
use dealhound_core::tracking::TrackingRepository;
use dealhound_core::transport::ChatTransport;
use dealhound_infrastructure::{ConfigService, TomlTrackingRepository};
use dealhound_interaction::{RainforestClient, TelegramClient};

/// Seconds to wait before re-polling after a failed `getUpdates` call.
const POLL_RETRY_SECS: u64 = 5;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Missing credentials abort startup before anything else is wired.
    let telegram = TelegramClient::try_from_env()?;
    let rainforest = RainforestClient::try_from_env()?;

    let config = ConfigService::new().get_config();
    let check_interval_secs = config.check_interval_secs;
    let rainforest = rainforest.with_amazon_domain(config.amazon_domain);

    let repository: Arc<dyn TrackingRepository> =
        Arc::new(TomlTrackingRepository::default_location().await?);
    let catalog: Arc<dyn CatalogSearch> = Arc::new(rainforest);
    let transport: Arc<dyn ChatTransport> = Arc::new(telegram.clone());

    let bot = BotService::new(
        SessionStore::new(),
        Arc::clone(&repository),
        Arc::clone(&catalog),
        Arc::clone(&transport),
    );

    let watcher = Arc::new(WatcherService::new(repository, catalog, transport));
    watcher.start_price_check_scheduler(check_interval_secs);

    if let Err(err) = telegram.set_my_commands(bot_commands()).await {
        tracing::warn!(target: "bot", "Command menu registration failed: {}", err);
    }

    tracing::info!(target: "bot", "Dealhound started, polling for updates");

    let mut offset = None;
    loop {
        let updates = match telegram.get_updates(offset).await {
            Ok(updates) => updates,
            Err(err) => {
                tracing::warn!(target: "bot", "Update poll failed: {}", err);
                tokio::time::sleep(Duration::from_secs(POLL_RETRY_SECS)).await;
                continue;
            }
        };

        for update in updates {
            // Advance the cursor even when handling fails so a poison update
            // is never re-delivered.
            offset = Some(update.update_id + 1);

            if let Err(err) = bot.handle_update(&update).await {
                tracing::error!(target: "bot", "Update {} failed: {}", update.update_id, err);
            }
        }
    }
}
