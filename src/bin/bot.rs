//! Homework review notifier
//!
//! Reads credentials from the environment (or a `.env` file) and polls until
//! killed.

use std::env;
use std::sync::Arc;

use homework_notifier::{
    config,
    error::{AppError, Result},
    pipeline::Poller,
    services::{HomeworkClient, TelegramNotifier},
    utils,
};

/// Log a startup failure; the bot exits right after.
fn fatal(e: AppError) -> AppError {
    log::error!("CRITICAL: {}. Bot is not started.", e);
    e
}

/// Main entry point for the notifier.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let started = config::startup(&config::config_path(), |name| env::var(name).ok());
    let level = started
        .as_ref()
        .map(|(config, _)| config.logging.level.as_str())
        .unwrap_or("info");
    utils::log::init(level);
    let (config, credentials) = started.map_err(fatal)?;

    log::info!("Homework notifier starting...");

    let client = HomeworkClient::new(&config.api, &credentials.practicum_token).map_err(fatal)?;
    let notifier = TelegramNotifier::new(
        &credentials.telegram_token,
        &credentials.telegram_chat_id,
    )
    .map_err(fatal)?;

    Poller::new(Arc::new(config), client, Arc::new(notifier))
        .run()
        .await;

    Ok(())
}
