//! CLI configuration management

use crate::CliError;
use cadence_schedule::{Alignment, InsertStrategy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Strategy used when a command does not name one
    #[serde(default = "default_strategy")]
    pub default_strategy: InsertStrategy,
    /// Alignment used when a command does not name one
    #[serde(default = "default_alignment")]
    pub default_alignment: Alignment,
    /// Log filter used when `RUST_LOG` and `--log-level` are absent
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_strategy() -> InsertStrategy {
    InsertStrategy::Earliest
}

fn default_alignment() -> Alignment {
    Alignment::Left
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_strategy: default_strategy(),
            default_alignment: default_alignment(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".cadence"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from file or return default
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                if path.exists() {
                    std::fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = Self::config_path()
            .ok_or_else(|| CliError::Config("Cannot determine config path".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(path)
    }
}
