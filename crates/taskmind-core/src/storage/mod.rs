mod config;
pub mod task_db;

pub use config::{AssistantConfig, CacheConfig, Config, InsightsFrequency, ResponseStyle};
pub use task_db::{TaskDb, TaskFilter};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the TaskMind data directory, creating it if needed.
///
/// `TASKMIND_DATA_DIR` wins when set. Otherwise `~/.config/taskmind`, or
/// `~/.config/taskmind-dev` when `TASKMIND_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TASKMIND_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TASKMIND_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("taskmind-dev")
            } else {
                base_dir.join("taskmind")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
