//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/watchlens/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/watchlens/` (~/.config/watchlens/)
//! - State/Logs: `$XDG_STATE_HOME/watchlens/` (~/.local/state/watchlens/)

use crate::analytics::{
    AnalyticsOptions, StopWords, DEFAULT_KEYWORD_THRESHOLD, DEFAULT_MAX_KEYWORDS,
    DEFAULT_TOP_ENTITIES,
};
use crate::error::{Error, Result};
use crate::types::TimeZonePolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

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

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics pipeline configuration
#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    /// Keywords must appear in more than this many titles
    #[serde(default = "default_keyword_threshold")]
    pub keyword_threshold: u32,

    /// Number of keywords kept in the ranking
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,

    /// Number of channels kept in the ranking
    #[serde(default = "default_top_entities")]
    pub top_entities: usize,

    /// Words added to the built-in stop-word tables
    #[serde(default)]
    pub extra_stop_words: Vec<String>,

    /// Zone for monthly/hourly bucketing: "utc", "local" or "+HH:MM"
    #[serde(default)]
    pub timezone: TimeZonePolicy,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            keyword_threshold: default_keyword_threshold(),
            max_keywords: default_max_keywords(),
            top_entities: default_top_entities(),
            extra_stop_words: vec![],
            timezone: TimeZonePolicy::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.max_keywords == 0 {
            return Err(Error::Config(
                "analytics.max_keywords must be at least 1".to_string(),
            ));
        }
        if self.top_entities == 0 {
            return Err(Error::Config(
                "analytics.top_entities must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Options for the analytics pipeline.
    pub fn options(&self) -> AnalyticsOptions {
        AnalyticsOptions {
            keyword_threshold: self.keyword_threshold,
            max_keywords: self.max_keywords,
            top_entities: self.top_entities,
            stop_words: StopWords::with_extra(&self.extra_stop_words),
            timezone: self.timezone,
        }
    }
}

fn default_keyword_threshold() -> u32 {
    DEFAULT_KEYWORD_THRESHOLD
}

fn default_max_keywords() -> usize {
    DEFAULT_MAX_KEYWORDS
}

fn default_top_entities() -> usize {
    DEFAULT_TOP_ENTITIES
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
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

        config.analytics.validate()?;
        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/watchlens/config.toml` (~/.config/watchlens/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("watchlens").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/watchlens/` (~/.local/state/watchlens/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("watchlens")
    }
}
