// lib/src/config/mod.rs
pub mod config_constants;
pub mod config_helpers;
pub mod config_structs;

pub use config_constants::*;
pub use config_helpers::{
    apply_env_overrides, default_config_path, default_config_root, load_client_config,
    save_client_config,
};
pub use config_structs::{ClientConfig, ClientConfigWrapper};
