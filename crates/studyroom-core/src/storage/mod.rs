mod backend;
mod config;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use config::{Config, NotificationsConfig, TaskOrderConfig, TasksConfig, UiConfig};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the directory holding the planner document and `config.toml`.
///
/// `STUDYROOM_DATA_DIR` wins if set. Otherwise `~/.config/studyroom[-dev]/`
/// based on `STUDYROOM_ENV` (set `STUDYROOM_ENV=dev` for a development
/// data directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("STUDYROOM_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studyroom-dev")
            } else {
                base_dir.join("studyroom")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
