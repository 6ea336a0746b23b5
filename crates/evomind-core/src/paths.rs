//! Well-known filesystem locations

use std::path::PathBuf;

use crate::constants;

/// Root config directory (`~/.evomind`)
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(constants::storage::CONFIG_DIR_NAME)
}

/// Directory for log files
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// SQLite database path
pub fn database_path() -> PathBuf {
    config_dir().join(constants::storage::DATABASE_FILE_NAME)
}

/// Config file path
pub fn config_file() -> PathBuf {
    config_dir().join(constants::storage::CONFIG_FILE_NAME)
}
