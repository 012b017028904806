//! Configuration types for crypto-ticker

use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Price feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the price source
    #[serde(default = "default_feed_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_feed_timeout_secs")]
    pub timeout_secs: u64,
}

/// Time-series store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the observation log
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_feed_base_url() -> String {
    crate::feed::COINGECKO_API_URL.to_string()
}
fn default_feed_timeout_secs() -> u64 {
    10
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_feed_base_url(),
            timeout_secs: default_feed_timeout_secs(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [feed]
            base_url = "https://api.coingecko.com"
            timeout_secs = 5

            [store]
            data_dir = "./data"

            [telemetry]
            log_level = "debug"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.feed.base_url, "https://api.coingecko.com");
        assert_eq!(config.feed.timeout_secs, 5);
        assert_eq!(config.store.data_dir, PathBuf::from("./data"));
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_config_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.feed.base_url, crate::feed::COINGECKO_API_URL);
        assert_eq!(config.feed.timeout_secs, 10);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }
}
