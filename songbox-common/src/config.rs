//! Bootstrap configuration
//!
//! Settings are resolved per field in priority order:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables (`BOT_TOKEN`, `ADMIN_ID`, `SONGBOX_SONGS_FILE`)
//! 3. TOML config file
//! 4. Compiled defaults (fallback)
//!
//! The TOML file is the one named by `--config` or `SONGBOX_CONFIG`, else
//! `<config dir>/songbox/config.toml` when it exists. A missing default file
//! is not an error; a missing explicit file is.

use crate::identity::AdminId;
use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
pub const ENV_ADMIN_ID: &str = "ADMIN_ID";
pub const ENV_SONGS_FILE: &str = "SONGBOX_SONGS_FILE";
pub const ENV_CONFIG: &str = "SONGBOX_CONFIG";

/// Song list location when nothing else is configured
pub const DEFAULT_SONGS_FILE: &str = "songs.txt";

/// Contents of the TOML config file; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Telegram bot token
    #[serde(default)]
    pub bot_token: Option<String>,

    /// User id allowed to delete songs
    #[serde(default)]
    pub admin_id: Option<AdminId>,

    /// Path of the song list file
    #[serde(default)]
    pub songs_file: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr only if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("{} ({})", e, path.display())))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }
}

/// Command-line values; `None` falls through to the next source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub bot_token: Option<String>,
    pub admin_id: Option<u64>,
    pub songs_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved bot configuration
#[derive(Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub admin_id: AdminId,
    pub songs_file: PathBuf,
    pub logging: LoggingConfig,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("admin_id", &self.admin_id)
            .field("songs_file", &self.songs_file)
            .field("logging", &self.logging)
            .finish()
    }
}

impl BotConfig {
    /// Resolve configuration from CLI overrides, environment, TOML and defaults
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let toml_config = match config_file_path(overrides.config_path.as_deref()) {
            Some((path, explicit)) if explicit || path.exists() => {
                let config = TomlConfig::load(&path)?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            _ => {
                debug!("No config file found, using environment and defaults");
                TomlConfig::default()
            }
        };

        Self::from_sources(overrides, toml_config)
    }

    /// Merge already-loaded sources; environment is read here
    pub fn from_sources(overrides: ConfigOverrides, toml_config: TomlConfig) -> Result<Self> {
        let bot_token = overrides
            .bot_token
            .or_else(|| env_value(ENV_BOT_TOKEN))
            .or(toml_config.bot_token)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(format!(
                    "Bot token not set (use --token, {} or bot_token in config.toml)",
                    ENV_BOT_TOKEN
                ))
            })?;

        let admin_id = match overrides.admin_id {
            Some(id) => AdminId(id),
            None => match env_value(ENV_ADMIN_ID) {
                Some(raw) => AdminId(raw.trim().parse().map_err(|e| {
                    Error::Config(format!("Invalid {} '{}': {}", ENV_ADMIN_ID, raw, e))
                })?),
                None => toml_config.admin_id.ok_or_else(|| {
                    Error::Config(format!(
                        "Administrator id not set (use --admin-id, {} or admin_id in config.toml)",
                        ENV_ADMIN_ID
                    ))
                })?,
            },
        };

        let songs_file = overrides
            .songs_file
            .or_else(|| env_value(ENV_SONGS_FILE).map(PathBuf::from))
            .or(toml_config.songs_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SONGS_FILE));

        let mut logging = toml_config.logging;
        if let Some(level) = overrides.log_level {
            logging.level = level;
        }

        Ok(Self {
            bot_token,
            admin_id,
            songs_file,
            logging,
        })
    }
}

/// Config file to read, and whether it was named explicitly
fn config_file_path(cli_path: Option<&Path>) -> Option<(PathBuf, bool)> {
    if let Some(path) = cli_path {
        return Some((path.to_path_buf(), true));
    }
    if let Some(path) = env_value(ENV_CONFIG) {
        return Some((PathBuf::from(path), true));
    }
    default_config_path().map(|path| (path, false))
}

/// `~/.config/songbox/config.toml` on Linux, the platform equivalent elsewhere
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("songbox").join("config.toml"))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
