use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "tracker";

/// Resolves files inside the per-user application data directory.
///
/// - Windows: `%LOCALAPPDATA%\tracker`
/// - macOS: `~/Library/Application Support/tracker`
/// - Linux: `$XDG_DATA_HOME/tracker`, falling back to `~/.local/share/tracker`
#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("XDG_DATA_HOME").unwrap_or_else(|_| var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share"),
        };

        Self::at(Path::new(&base_path).join(APP_NAME))
    }

    /// Storage rooted at an explicit directory.
    pub fn at(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Full path of `file_name`, creating the directory on first use.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
