//! songbox-bot - Telegram bot collecting song suggestions
//!
//! Users send song titles; duplicates (same words ignoring case, punctuation
//! and order) are refused. The administrator is notified of each new song and
//! can delete entries with `/delete <number>`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use songbox_common::config::{BotConfig, ConfigOverrides};
use songbox_common::{Catalog, SongStore};
use songbox_bot::{logging, telegram, AppState};
use teloxide::Bot;
use tracing::info;

/// Command-line arguments for songbox-bot
///
/// Each option falls back to its environment variable, then the config file.
#[derive(Parser, Debug)]
#[command(name = "songbox-bot")]
#[command(about = "Telegram bot collecting song suggestions")]
#[command(version)]
struct Args {
    /// TOML config file (default: <config dir>/songbox/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Telegram bot token (env: BOT_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// User id allowed to delete songs (env: ADMIN_ID)
    #[arg(long)]
    admin_id: Option<u64>,

    /// Song list file (env: SONGBOX_SONGS_FILE)
    #[arg(short, long)]
    songs_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            config_path: args.config,
            bot_token: args.token,
            admin_id: args.admin_id,
            songs_file: args.songs_file,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = BotConfig::resolve(args.into()).context("Failed to load configuration")?;

    let _log_guard = logging::init_tracing(&config.logging)?;

    info!(
        "Starting songbox-bot v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Song list: {}", config.songs_file.display());
    info!("Administrator: {}", config.admin_id);

    let catalog = Catalog::load(SongStore::new(&config.songs_file), config.admin_id)
        .context("Failed to load song list")?;
    let state = AppState::new(catalog);

    let bot = Bot::new(&config.bot_token);
    telegram::run(bot, state).await;

    info!("Bot stopped");
    Ok(())
}
