//! Server configuration
//!
//! Layered as built-in defaults, then an optional config file, then
//! `PEEPAL__`-prefixed environment variables (`PEEPAL__DATABASE__URL`, ...).

use ::config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use storage::StorageConfig;

/// Config file looked up when `PEEPAL_CONFIG` is unset (any supported extension)
pub const DEFAULT_CONFIG_PATH: &str = "config/peepal";

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: StorageConfig,
    pub logging: LoggingSettings,
    #[serde(default)]
    pub metrics: MetricsSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Max level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSettings {
    /// Prometheus scrape endpoint; disabled when unset
    pub listen_addr: Option<String>,
}

impl Settings {
    /// Load from `PEEPAL_CONFIG` (or [`DEFAULT_CONFIG_PATH`]) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("PEEPAL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load using `path` as the optional config file
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.bind_addr", "0.0.0.0:8080")?
            .set_default("database.url", "sqlite://peepal.db")?
            .set_default("database.max_connections", 5_i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("PEEPAL").separator("__"))
            .build()?
            .try_deserialize()
    }
}
