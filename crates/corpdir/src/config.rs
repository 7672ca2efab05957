//! Configuration management for corpdir.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "corpdir";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "directory.db";

/// Storage key the directory snapshot lives under.
pub const DEFAULT_STORAGE_KEY: &str = "companyDirectory";

/// Largest accepted photo upload (2 MiB).
pub const DEFAULT_PHOTO_MAX_BYTES: u64 = 2 * 1024 * 1024;

/// Default storage quota (5 MiB), matching common browser local storage limits.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CORPDIR_`, nested keys split on `__`)
/// 2. TOML config file at `~/.config/corpdir/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Photo upload configuration.
    pub photo: PhotoConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/corpdir/directory.db`
    pub database_path: Option<PathBuf>,
    /// Key holding the serialized directory.
    pub key: String,
    /// Maximum bytes the store may hold. Set to 0 for unlimited.
    pub quota_bytes: usize,
}

/// Photo-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    /// Largest accepted upload in bytes.
    pub max_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            key: DEFAULT_STORAGE_KEY.to_string(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_PHOTO_MAX_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("CORPDIR_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage key must not be empty".to_string(),
            });
        }

        if self.photo.max_size_bytes == 0 {
            return Err(Error::ConfigValidation {
                message: "photo max_size_bytes must be greater than 0".to_string(),
            });
        }

        // A photo is stored base64-encoded, so it grows by a third.
        if let Some(quota) = self.quota() {
            let encoded = self
                .photo
                .max_size_bytes
                .div_ceil(3)
                .checked_mul(4)
                .and_then(|encoded| usize::try_from(encoded).ok());
            if encoded.map_or(true, |encoded| encoded > quota) {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "photo max_size_bytes ({}) does not fit in quota_bytes ({quota}) once encoded",
                        self.photo.max_size_bytes
                    ),
                });
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the storage quota, or `None` when unlimited.
    #[must_use]
    pub fn quota(&self) -> Option<usize> {
        match self.storage.quota_bytes {
            0 => None,
            n => Some(n),
        }
    }
}
