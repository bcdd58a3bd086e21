//! Host configuration persisted as TOML.
//!
//! The file mirrors the library's [`SearchConfig`] under a `[search]` table.
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! [search]
//! max_results_per_source = 20
//! search_timeout_seconds = 15
//!
//! [search.fetch]
//! max_attempts = 5
//! selection = { seeded = 42 }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use torrent_search::SearchConfig;

use crate::error::{Result, ScoutError};

/// Top-level configuration for the torrent-scout host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Aggregation, proxy and endpoint settings.
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ScoutError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ScoutError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/torrent-scout/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("torrent-scout").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("torrent-scout")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/torrent-scout/config.toml")
        }
    }

    /// Load `path` if given, else the default path if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit or existing default file is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Self::default_config_path();
                if default.is_file() {
                    tracing::debug!(path = %default.display(), "loading default config");
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
