use anyhow::{Context, Result};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::cleanup::{DEFAULT_HEADER_THRESHOLD, DEFAULT_SENTENCE_THRESHOLD};
use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Similarity above which a later sentence counts as a duplicate (0.0 - 1.0)
    #[serde(default = "default_sentence_threshold")]
    pub sentence_threshold: f64,

    /// Similarity at or above which a later header counts as a duplicate (0.0 - 1.0)
    #[serde(default = "default_header_threshold")]
    pub header_threshold: f64,

    /// File extensions treated as Markdown documents (without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Maximum number of files processed at the same time
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Follow symbolic links while walking directories
    #[serde(default = "default_true")]
    pub follow_links: bool,

    /// Write a report file listing every change into the processed directory
    #[serde(default)]
    pub write_report: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "conf.json";

fn default_sentence_threshold() -> f64 {
    DEFAULT_SENTENCE_THRESHOLD
}

fn default_header_threshold() -> f64 {
    DEFAULT_HEADER_THRESHOLD
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

fn default_concurrent_files() -> usize {
    4
}

fn default_true() -> bool {
    true
}

/// Parse a threshold typed by the user.
///
/// Unparseable or out-of-range input is not an error: a warning is logged
/// and `default` is returned instead.
pub fn parse_threshold(raw: &str, default: f64) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) => checked_threshold(value, default),
        Err(e) => {
            warn!("Invalid threshold '{}': {}. Using default {}.", raw.trim(), e, default);
            default
        }
    }
}

/// Return `value` if it lies in `[0.0, 1.0]`, otherwise warn and return `default`
pub fn checked_threshold(value: f64, default: f64) -> f64 {
    if (0.0..=1.0).contains(&value) {
        value
    } else {
        warn!(
            "Invalid threshold {}: must be between 0.0 and 1.0. Using default {}.",
            value, default
        );
        default
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.iter().all(|ext| normalize_extension(ext).is_empty()) {
            return Err(ConfigError::NoExtensions);
        }

        if self.concurrent_files == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        Ok(())
    }

    /// Sentence threshold, falling back to the default when out of range
    pub fn effective_sentence_threshold(&self) -> f64 {
        checked_threshold(self.sentence_threshold, DEFAULT_SENTENCE_THRESHOLD)
    }

    /// Header threshold, falling back to the default when out of range
    pub fn effective_header_threshold(&self) -> f64 {
        checked_threshold(self.header_threshold, DEFAULT_HEADER_THRESHOLD)
    }

    /// Configured extensions without leading dots, lowercased, empty ones removed
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
            }
        }

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Load the configuration, writing a default one first if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Pick the configuration file to use.
    ///
    /// An explicit path always wins. Otherwise `conf.json` in the working
    /// directory is used when present, then the per-user config directory,
    /// and finally `conf.json` in the working directory is created.
    pub fn locate(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return local;
        }

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                return user_config;
            }
        }

        local
    }

    // @returns: <config dir>/mdtidy/conf.json, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mdtidy").join(DEFAULT_CONFIG_FILE))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            sentence_threshold: default_sentence_threshold(),
            header_threshold: default_header_threshold(),
            extensions: default_extensions(),
            concurrent_files: default_concurrent_files(),
            follow_links: default_true(),
            write_report: false,
            log_level: LogLevel::default(),
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
