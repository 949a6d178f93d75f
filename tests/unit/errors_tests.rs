/*!
 * Tests for error types
 */

use std::io;
use std::path::PathBuf;
use mdtidy::errors::{AppError, ConfigError, FileError};

/// Test that file errors carry their path in the message
#[test]
fn test_file_error_display_shouldIncludePath() {
    let error = FileError::Read {
        path: PathBuf::from("docs/a.md"),
        source: io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
    };

    assert_eq!(error.path(), &PathBuf::from("docs/a.md"));
    assert!(error.to_string().contains("docs/a.md"));
    assert!(error.to_string().contains("valid UTF-8"));
}

/// Test conversions into the application error
#[test]
fn test_app_error_from_shouldWrapSources() {
    let app: AppError = ConfigError::ZeroConcurrency.into();
    assert!(matches!(app, AppError::Config(ConfigError::ZeroConcurrency)));
    assert!(app.to_string().starts_with("Configuration error:"));

    let app: AppError = FileError::Worker {
        path: PathBuf::from("x.md"),
        message: "cancelled".to_string(),
    }
    .into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(app, AppError::Unknown(ref message) if message == "boom"));

    let app: AppError = io::Error::new(io::ErrorKind::Other, "disk").into();
    assert!(matches!(app, AppError::Unknown(_)));
}

/// Test the missing input message
#[test]
fn test_missing_input_display_shouldNamePath() {
    let error = AppError::MissingInput(PathBuf::from("nowhere"));
    assert_eq!(error.to_string(), "Input path does not exist: nowhere");
}
