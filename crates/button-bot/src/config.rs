//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Discord configuration
    pub discord: DiscordConfig,

    /// Interactions endpoint configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Button storage configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Button behaviour configuration
    #[serde(default)]
    pub buttons: ButtonsConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    /// Bot token
    pub token: String,

    /// Application id (used for command registration)
    pub application_id: String,

    /// Hex-encoded Ed25519 public key used to verify interaction requests
    pub public_key: String,

    /// REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Register commands for this guild only (instant) instead of globally
    #[serde(default)]
    pub guild_id: Option<String>,

    /// Overwrite slash commands at startup
    #[serde(default = "default_true")]
    pub register_commands: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON button store
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Enable persistence (if false, buttons are kept in memory only)
    #[serde(default = "default_true")]
    pub persist: bool,
}

/// How `removebutton` finds the button to delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoveMatch {
    /// Rebuild the component id from the label and the current invocation id.
    /// Only matches when the id equals the one minted by `addbutton`.
    #[default]
    Invocation,
    /// First stored button on the message with the given label.
    Label,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ButtonsConfig {
    #[serde(default)]
    pub remove_match: RemoveMatch,

    /// Push the remaining buttons to the live message after a removal
    #[serde(default)]
    pub rerender_on_remove: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format
    #[serde(default)]
    pub log_format: LogFormat,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            persist: true,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

// Default value functions
fn default_api_base_url() -> String {
    "https://discord.com/api/v10".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_store_path() -> PathBuf {
    PathBuf::from("/data/buttons.json")
}

fn default_log_level() -> String {
    "info".into()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_source(config::Environment::default().separator("__"))
    }

    /// Build configuration from an explicit environment source.
    pub fn from_source(source: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            // Snowflake ids must stay strings.
            .add_source(source.try_parsing(false))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
