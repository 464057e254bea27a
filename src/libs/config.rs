//! Application configuration.
//!
//! Stored as pretty-printed JSON in `config.json` inside the application data
//! directory. A missing file means defaults; a file with missing fields fills
//! them from defaults too, so older files keep loading.
//!
//! ```rust,no_run
//! use tracker::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.analytics.enabled = false;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const JOURNAL_FILE_NAME: &str = "analytics.jsonl";

/// Where usage events go.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub enabled: bool,
    /// JSON-lines file events are appended to. Events are only logged when unset.
    pub journal: Option<PathBuf>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            journal: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Database file, relative to the data directory unless absolute.
    pub db_file_name: String,
    pub analytics: AnalyticsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_file_name: DB_FILE_NAME.to_string(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from the application data directory.
    pub fn read() -> Result<Config> {
        Self::read_from(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Resolved database path inside `storage`.
    pub fn db_path(&self, storage: &DataStorage) -> Result<PathBuf> {
        let file = Path::new(&self.db_file_name);
        if file.is_absolute() {
            return Ok(file.to_path_buf());
        }
        storage.get_path(&self.db_file_name)
    }
}
