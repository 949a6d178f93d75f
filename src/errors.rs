/*!
 * Error types for the mdtidy application.
 *
 * The text transforms themselves are total and never fail; everything that
 * can go wrong lives in the surrounding file handling and configuration,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while processing a single document file
#[derive(Error, Debug)]
pub enum FileError {
    /// The file could not be read (missing, permissions, not UTF-8)
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The cleaned content could not be written back
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File that was being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The worker running the transform panicked or was cancelled
    #[error("Worker for {path} failed: {message}")]
    Worker {
        /// File the worker was processing
        path: PathBuf,
        /// Join error description
        message: String,
    },
}

impl FileError {
    /// Path of the file this error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::Worker { path, .. } => path,
        }
    }
}

/// Errors in the configuration file or command-line overrides
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No Markdown extension configured, nothing would ever be processed
    #[error("At least one file extension must be configured")]
    NoExtensions,

    /// Worker count of zero
    #[error("concurrent_files must be at least 1")]
    ZeroConcurrency,

    /// Configuration file exists but cannot be parsed
    #[error("Invalid configuration file {path}: {message}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Parser message
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Error from configuration handling
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input path does not exist
    #[error("Input path does not exist: {0}")]
    MissingInput(PathBuf),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
