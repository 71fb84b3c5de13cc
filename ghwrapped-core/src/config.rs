//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/gh-wrapped/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/gh-wrapped/` (~/.config/gh-wrapped/)
//! - Data: `$XDG_DATA_HOME/gh-wrapped/` (~/.local/share/gh-wrapped/)
//! - State/Logs: `$XDG_STATE_HOME/gh-wrapped/` (~/.local/state/gh-wrapped/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "gh-wrapped";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Scoring knobs for the derivation engine
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tunables for the stats, achievement and age engines.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Starting point of the predicted age before adjustments
    #[serde(default = "default_baseline_age")]
    pub baseline_age: i32,

    /// Lower clamp for the predicted age
    #[serde(default = "default_min_age")]
    pub min_age: i32,

    /// Upper clamp for the predicted age
    #[serde(default = "default_max_age")]
    pub max_age: i32,

    /// Number of repositories kept in the top-repos ranking
    #[serde(default = "default_top_repos")]
    pub top_repos: usize,

    /// Cap on languages listed for the most diverse day
    #[serde(default = "default_max_diverse_languages")]
    pub max_diverse_languages: usize,

    /// Cap on ranked languages
    #[serde(default = "default_max_languages")]
    pub max_languages: usize,

    /// Number of collaborators kept in the squad
    #[serde(default = "default_squad_size")]
    pub squad_size: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            baseline_age: default_baseline_age(),
            min_age: default_min_age(),
            max_age: default_max_age(),
            top_repos: default_top_repos(),
            max_diverse_languages: default_max_diverse_languages(),
            max_languages: default_max_languages(),
            squad_size: default_squad_size(),
        }
    }
}

impl ScoringConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.min_age > self.max_age {
            return Err(Error::Config(format!(
                "scoring.min_age ({}) must not exceed scoring.max_age ({})",
                self.min_age, self.max_age
            )));
        }
        if self.top_repos == 0 {
            return Err(Error::Config(
                "scoring.top_repos must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_baseline_age() -> i32 {
    25
}

fn default_min_age() -> i32 {
    16
}

fn default_max_age() -> i32 {
    70
}

fn default_top_repos() -> usize {
    5
}

fn default_max_diverse_languages() -> usize {
    5
}

fn default_max_languages() -> usize {
    10
}

fn default_squad_size() -> usize {
    crate::analytics::squad::SQUAD_SIZE
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,

    /// Directory for log files (default: the XDG state directory)
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Also print log lines to stderr
    #[serde(default)]
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
            directory: None,
            stderr: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.scoring.validate()?;
        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/gh-wrapped/config.toml` (~/.config/gh-wrapped/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join(APP_DIR).join("config.toml")
    }

    /// Returns the data directory path (for SQLite database)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join(APP_DIR)
    }

    /// Returns the state directory path (for logs)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join(APP_DIR)
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/gh-wrapped/wrapped.db`
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("wrapped.db")
    }
}

impl LoggingConfig {
    /// Directory the rolling log files are written to
    pub fn log_dir(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(Config::state_dir)
    }
}
