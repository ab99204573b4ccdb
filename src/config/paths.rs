//! Where spendlog keeps its files
//!
//! The base directory is `$SPENDLOG_DATA_DIR` when set, otherwise the
//! platform config directory from `directories` (`~/.config/spendlog` on
//! Linux, `~/Library/Application Support/spendlog` on macOS,
//! `%APPDATA%\spendlog\config` on Windows).
//!
//! ```text
//! <base>/config.json        settings
//! <base>/data/<key>.json    one document per key-value store key
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::SpendError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SPENDLOG_DATA_DIR";

const APP_NAME: &str = "spendlog";

#[derive(Debug, Clone)]
pub struct SpendPaths {
    base_dir: PathBuf,
}

impl SpendPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Fails when the override is unset and the platform reports no home
    /// directory.
    pub fn new() -> Result<Self, SpendError> {
        Self::resolve(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    /// Use `override_dir` if given, else the platform default
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self, SpendError> {
        let base_dir = match override_dir.filter(|dir| !dir.as_os_str().is_empty()) {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", APP_NAME)
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    SpendError::Config("Could not determine a home directory".into())
                })?,
        };
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Create the data directory (and the base directory above it)
    pub fn ensure_directories(&self) -> Result<(), SpendError> {
        let data_dir = self.data_dir();
        std::fs::create_dir_all(&data_dir).map_err(|e| {
            SpendError::io(format!("Failed to create {}", data_dir.display()), e)
        })
    }
}
