// lib/src/config/config_helpers.rs
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use serde_yaml2 as serde_yaml;

use crate::config::config_constants::*;
use crate::config::config_structs::{ClientConfig, ClientConfigWrapper};

/// `~/.medicare`, or `./.medicare` when no home directory is known.
pub fn default_config_root() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_ROOT_DIRECTORY_STR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_ROOT_DIRECTORY_STR))
}

pub fn default_config_path() -> PathBuf {
    default_config_root().join(DEFAULT_CONFIG_FILE_NAME)
}

/// Loads the client config, falling back to defaults when the file is absent.
/// Environment overrides are applied last.
pub fn load_client_config(config_file_path: Option<&Path>) -> Result<ClientConfig> {
    let path_to_use = config_file_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    info!("Attempting to load client config from {:?}", path_to_use);

    let config = if path_to_use.exists() {
        let config_content = fs::read_to_string(&path_to_use)
            .context(format!("Failed to read client config file: {}", path_to_use.display()))?;
        debug!("Client config content: {}", config_content);
        let wrapper: ClientConfigWrapper = serde_yaml::from_str(&config_content).map_err(|e| {
            error!("YAML parsing error for client config at {:?}: {:?}", path_to_use, e);
            anyhow!("Failed to parse client config YAML: {}", path_to_use.display())
        })?;
        info!("Loaded client config: {:?}", wrapper.client);
        wrapper.client
    } else {
        warn!("Config file not found at {}. Using default client config.", path_to_use.display());
        ClientConfig::default()
    };

    Ok(apply_env_overrides(config, |key| env::var(key).ok()))
}

/// Applies `MEDICARE_API_URL` / `MEDICARE_SESSION_DIR` from `lookup`.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        debug!("{} overrides api_base_url with {}", ENV_API_URL, url);
        config.api_base_url = url.trim().to_string();
    }
    if let Some(dir) = lookup(ENV_SESSION_DIR).filter(|v| !v.trim().is_empty()) {
        debug!("{} overrides session_directory with {}", ENV_SESSION_DIR, dir);
        config.session_directory = PathBuf::from(dir.trim());
    }
    config
}

pub fn save_client_config(config: &ClientConfig, config_file_path: Option<&Path>) -> Result<PathBuf> {
    let config_path = config_file_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    let wrapper = ClientConfigWrapper {
        config_root_directory: default_config_root().display().to_string(),
        client: config.clone(),
    };

    let yaml_string = serde_yaml::to_string(&wrapper)
        .map_err(|e| anyhow!("Failed to serialize ClientConfig to YAML: {:?}", e))?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create parent directories for {}", config_path.display()))?;
    }

    fs::write(&config_path, yaml_string)
        .context(format!("Failed to write ClientConfig to file: {}", config_path.display()))?;

    info!("Saved client config to {}", config_path.display());
    Ok(config_path)
}
