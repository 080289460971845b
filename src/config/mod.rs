//! Configuration management for Oddsdesk.

mod settings;

pub use settings::{ApiConfig, Config, FeedConfig, KeyBindings, UiConfig};

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "ODDSDESK";

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "ODDSDESK_CONFIG";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "oddsdesk", "oddsdesk")
        .ok_or_else(|| Error::config("Could not determine project directories"))
}

/// Get the configuration directory path.
pub fn config_dir() -> Result<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the log directory path.
pub fn log_dir() -> Result<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("logs"))
}

/// Resolve the config file path: explicit argument, then `ODDSDESK_CONFIG`,
/// then `<config_dir>/config.toml`.
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| {
            config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        })
}
