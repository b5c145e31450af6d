//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram configuration
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Relay configuration
    pub relay: RelayConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API host
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bot token issued by BotFather
    #[serde(default)]
    pub bot_token: String,

    /// Long-poll timeout for getUpdates
    #[serde(default = "default_poll_timeout", with = "humantime_serde")]
    pub poll_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// The operator's Telegram user id; all relayed traffic lands in this chat
    pub operator_id: u64,

    /// Prefix that marks an operator reply as a command
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Public name shown to blocked correspondents
    pub operator_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Blocklist snapshot location
    #[serde(default = "default_blocklist_path")]
    pub blocklist_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default implementations
impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            bot_token: String::new(),
            poll_timeout: default_poll_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            blocklist_path: default_blocklist_path(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_api_url() -> String {
    "https://api.telegram.org".into()
}

fn default_poll_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_command_prefix() -> String {
    "!".into()
}

fn default_blocklist_path() -> PathBuf {
    "blocked_users.json".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Bot tokens look numeric up to the colon. Keep strings
                    // as strings and let serde coerce the numeric fields.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
