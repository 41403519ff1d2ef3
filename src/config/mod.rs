//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Defaults applied to stats queries when the command line leaves them out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsDefaults {
    /// Table sizes counted by leaderboards and head-to-head
    #[serde(default = "default_table_sizes")]
    pub table_sizes: Vec<u32>,

    /// Minimum games for leaderboard and deck entries
    #[serde(default)]
    pub min_games: u32,

    /// Number of decks in top-deck lists
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Games between win-rate curve samples
    #[serde(default = "default_step_size")]
    pub step_size: i32,

    /// Player groups to restrict to; unset means every group
    #[serde(default)]
    pub group_ids: Option<Vec<u32>>,
}

fn default_table_sizes() -> Vec<u32> {
    vec![3, 4, 5, 6]
}

fn default_limit() -> usize {
    6
}

fn default_step_size() -> i32 {
    3
}

impl Default for StatsDefaults {
    fn default() -> Self {
        Self {
            table_sizes: default_table_sizes(),
            min_games: 0,
            limit: default_limit(),
            step_size: default_step_size(),
            group_ids: None,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub stats: StatsDefaults,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            stats: StatsDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stats.limit == 0 {
            return Err(ConfigError::ValidationError(
                "Deck list limit must be greater than 0".to_string(),
            ));
        }

        if self.stats.table_sizes.contains(&0) {
            return Err(ConfigError::ValidationError(
                "Table sizes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
