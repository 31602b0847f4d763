mod config;
pub mod snapshot;

pub use config::{CoachConfig, Config, StorageConfig};
pub use snapshot::{MemorySnapshotStore, SnapshotStore, SqliteSnapshotStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `STUDYBUDDY_DATA_DIR` wins when set. Otherwise `~/.config/studybuddy[-dev]/`,
/// with `STUDYBUDDY_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("STUDYBUDDY_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STUDYBUDDY_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("studybuddy-dev")
            } else {
                base_dir.join("studybuddy")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
