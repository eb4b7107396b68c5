use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;

use jukebot::config::{self, Config};
use jukebot::logging::init_logger;
use jukebot::pipeline::PlayerDeps;
use jukebot::telegram;

/// Main entry point for the Telegram bot.
///
/// # Errors
/// Returns an error if initialization fails (logging, data directories).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    let config = Config::from_env();
    config.ensure_dirs()?;
    log::info!(
        "🎵 jukebot starting (default platform: {}, NCM conversion: {})",
        config.default_platform.display_name(),
        config.enable_conversion
    );
    log::info!("Song cache: {}", config.songs_dir().display());

    let deps = Arc::new(PlayerDeps::new(config));
    telegram::run(deps).await;
    Ok(())
}
