// lib/src/config/config_structs.rs
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::config_constants::*;
use crate::config::config_helpers::default_config_root;

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_session_directory() -> PathBuf {
    default_config_root().join(DEFAULT_SESSION_DIRECTORY_NAME)
}

fn default_session_ttl_days() -> i64 {
    DEFAULT_SESSION_TTL_DAYS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_er_poll_interval_secs() -> u64 {
    DEFAULT_ER_POLL_INTERVAL_SECS
}

fn default_cache_capacity() -> u64 {
    DEFAULT_CACHE_CAPACITY
}

fn default_low_stock_threshold() -> i64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

/// Console client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url", alias = "api-base-url")]
    pub api_base_url: String,
    #[serde(default = "default_session_directory", alias = "session-directory")]
    pub session_directory: PathBuf,
    #[serde(default = "default_session_ttl_days", alias = "session-ttl-days")]
    pub session_ttl_days: i64,
    #[serde(default = "default_request_timeout_secs", alias = "request-timeout-secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_er_poll_interval_secs", alias = "er-poll-interval-secs")]
    pub er_poll_interval_secs: u64,
    #[serde(default = "default_cache_capacity", alias = "cache-capacity")]
    pub cache_capacity: u64,
    #[serde(default = "default_low_stock_threshold", alias = "low-stock-threshold")]
    pub low_stock_threshold: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base_url: default_api_base_url(),
            session_directory: default_session_directory(),
            session_ttl_days: default_session_ttl_days(),
            request_timeout_secs: default_request_timeout_secs(),
            er_poll_interval_secs: default_er_poll_interval_secs(),
            cache_capacity: default_cache_capacity(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

impl ClientConfig {
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.session_ttl_days)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn er_poll_interval(&self) -> Duration {
        Duration::from_secs(self.er_poll_interval_secs.max(1))
    }
}

/// Wrapper for the on-disk YAML layout
#[derive(Debug, Deserialize, Serialize)]
pub struct ClientConfigWrapper {
    #[serde(default)]
    pub config_root_directory: String,
    pub client: ClientConfig,
}
