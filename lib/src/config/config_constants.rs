// lib/src/config/config_constants.rs

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_CONFIG_ROOT_DIRECTORY_STR: &str = ".medicare";
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.yaml";
pub const DEFAULT_SESSION_DIRECTORY_NAME: &str = "session";

/// Persisted session entries expire this many days after login.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_ER_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_CACHE_CAPACITY: u64 = 64;
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 20;

pub const ENV_API_URL: &str = "MEDICARE_API_URL";
pub const ENV_SESSION_DIR: &str = "MEDICARE_SESSION_DIR";

pub const SESSION_TOKEN_KEY: &str = "token";
pub const SESSION_USER_KEY: &str = "user";
