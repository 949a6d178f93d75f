/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use mdtidy::app_config::{Config, LogLevel, checked_threshold, parse_threshold};
use mdtidy::errors::ConfigError;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.sentence_threshold, 0.8);
    assert_eq!(config.header_threshold, 0.85);
    assert_eq!(config.extensions, vec!["md".to_string()]);
    assert_eq!(config.concurrent_files, 4);
    assert!(config.follow_links);
    assert!(!config.write_report);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.concurrent_files = 0;
    assert!(matches!(config.validate(), Err(ConfigError::ZeroConcurrency)));
    config.concurrent_files = 2;

    config.extensions = vec![".".to_string(), "".to_string()];
    assert!(matches!(config.validate(), Err(ConfigError::NoExtensions)));

    config.extensions = vec![".markdown".to_string()];
    assert!(config.validate().is_ok());
}

/// Test that out-of-range thresholds in the file fall back to the defaults
#[test]
fn test_effective_thresholds_withOutOfRangeValues_shouldFallBack() {
    let config = Config {
        sentence_threshold: 3.0,
        header_threshold: -1.0,
        ..Config::default()
    };

    assert_eq!(config.effective_sentence_threshold(), 0.8);
    assert_eq!(config.effective_header_threshold(), 0.85);
}

/// Test threshold parsing from user input
#[test]
fn test_parse_threshold_withUserInput_shouldValidate() {
    assert_eq!(parse_threshold("0.9", 0.8), 0.9);
    assert_eq!(parse_threshold("ninety", 0.8), 0.8);
    assert_eq!(parse_threshold("90", 0.85), 0.85);
    assert_eq!(checked_threshold(1.0, 0.8), 1.0);
    assert_eq!(checked_threshold(1.01, 0.8), 0.8);
}

/// Test save and load round trip
#[test]
fn test_save_and_load_withCustomConfig_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("conf.json");

    let config = Config {
        sentence_threshold: 0.7,
        extensions: vec!["md".to_string(), "markdown".to_string()],
        write_report: true,
        log_level: LogLevel::Debug,
        ..Config::default()
    };
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded, config);

    Ok(())
}

/// Test that missing fields are filled with defaults
#[test]
fn test_load_withPartialFile_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{ "header_threshold": 0.9, "log_level": "warn" }"#,
    )?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.header_threshold, 0.9);
    assert_eq!(loaded.log_level, LogLevel::Warn);
    assert_eq!(loaded.sentence_threshold, 0.8);
    assert_eq!(loaded.concurrent_files, 4);

    Ok(())
}

/// Test that a malformed file is reported as a parse error
#[test]
fn test_load_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{ not json")?;

    let error = Config::load(&path).expect_err("malformed config should not load");
    assert!(matches!(error.downcast_ref::<ConfigError>(), Some(ConfigError::Parse { .. })));

    Ok(())
}

/// Test that a default config file is written when none exists
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefault() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;
    assert_eq!(config, Config::default());
    assert!(path.exists());
    assert_eq!(Config::load(&path)?, Config::default());

    Ok(())
}

/// Test that an explicit config path always wins
#[test]
fn test_locate_withExplicitPath_shouldReturnIt() {
    let explicit = std::path::Path::new("/tmp/somewhere/custom.json");
    assert_eq!(Config::locate(Some(explicit)), explicit.to_path_buf());
}

/// Test the per-user config location
#[test]
fn test_user_config_path_shouldEndWithAppDirectory() {
    if let Some(path) = Config::user_config_path() {
        assert!(path.ends_with("mdtidy/conf.json"));
    }
}
