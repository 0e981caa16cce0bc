//! Redemption configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for one redemption campaign.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RedeemConfig {
    /// Campaign identifier; namespaces every cache key.
    #[serde(default = "default_campaign")]
    pub campaign: String,

    /// Proof source URLs, tried in order. The first successful response wins.
    #[serde(default)]
    pub candidates: Vec<String>,

    /// Per-candidate fetch timeout in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Proof index used when every candidate fails. When unset, the index
    /// compiled into the binary is used.
    #[serde(default)]
    pub fallback_path: Option<PathBuf>,

    /// Directory of the LMDB cache.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in bytes.
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_campaign() -> String {
    "default".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./redeem_data")
}

fn default_map_size() -> usize {
    64 * 1024 * 1024
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RedeemConfig {
    fn default() -> Self {
        Self {
            campaign: default_campaign(),
            candidates: Vec::new(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            fallback_path: None,
            data_dir: default_data_dir(),
            map_size: default_map_size(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl RedeemConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
