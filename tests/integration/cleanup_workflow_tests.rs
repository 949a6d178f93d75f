/*!
 * End-to-end tests for directory cleanup runs
 */

use std::fs;
use anyhow::Result;
use mdtidy::app_config::Config;
use mdtidy::app_controller::{Controller, REPORT_FILE_NAME, process_file};
use mdtidy::cleanup::{SentenceDeduplicator, TransformKind};
use std::sync::Arc;
use crate::common::{self, LONG_SENTENCE};

/// Test a folder run that changes only the documents with duplicates
#[tokio::test]
async fn test_run_folder_withMixedDocuments_shouldOnlyRewriteChangedFiles() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let dirty = common::create_test_markdown(&root, "dirty.md")?;
    let clean = common::create_test_file(&root, "nested/clean.md", &common::clean_markdown())?;
    let ignored = common::create_test_file(&root, "notes.txt", &common::duplicated_markdown())?;

    let controller = Controller::new_for_test()?;
    let summary = controller.run(TransformKind::DedupSentences, &root).await?;

    assert_eq!(summary.files, 2);
    assert_eq!(summary.changed, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.removed, 1);

    let dirty_content = fs::read_to_string(&dirty)?;
    assert_eq!(
        dirty_content,
        format!("{} Short one.```\n{}\n{}\n```", LONG_SENTENCE, LONG_SENTENCE, LONG_SENTENCE)
    );
    assert_eq!(fs::read_to_string(&clean)?, common::clean_markdown());
    assert_eq!(fs::read_to_string(&ignored)?, common::duplicated_markdown());
    assert!(!root.join(REPORT_FILE_NAME).exists());

    Ok(())
}

/// Test that a dry run reports changes without touching any file
#[tokio::test]
async fn test_run_folder_withDryRun_shouldNotModifyFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let dirty = common::create_test_markdown(&root, "dirty.md")?;

    let config = Config {
        write_report: true,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?.with_dry_run(true);
    let summary = controller.run(TransformKind::DedupSentences, &root).await?;

    assert_eq!(summary.changed, 1);
    assert_eq!(fs::read_to_string(&dirty)?, common::duplicated_markdown());
    assert!(!root.join(REPORT_FILE_NAME).exists());

    Ok(())
}

/// Test that an unreadable document is counted and the batch goes on
#[tokio::test]
async fn test_run_folder_withInvalidUtf8File_shouldContinueBatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let dirty = common::create_test_markdown(&root, "a.md")?;
    let broken = root.join("b.md");
    fs::write(&broken, [0xff, 0xfe, 0x00, 0x41])?;

    let controller = Controller::new_for_test()?;
    let summary = controller.run(TransformKind::DedupSentences, &root).await?;

    assert_eq!(summary.files, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.changed, 1);
    assert_ne!(fs::read_to_string(&dirty)?, common::duplicated_markdown());
    assert_eq!(fs::read(&broken)?, vec![0xff, 0xfe, 0x00, 0x41]);

    Ok(())
}

/// Test the configured extension list
#[tokio::test]
async fn test_run_folder_withCustomExtensions_shouldIncludeThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let markdown = common::create_test_file(&root, "guide.markdown", "```dot\na -> b\n```\n")?;
    let md = common::create_test_file(&root, "readme.md", "```dot\nc -> d\n```\n")?;

    let config = Config {
        extensions: vec![".markdown".to_string()],
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;
    let summary = controller.run(TransformKind::RetagDot, &root).await?;

    assert_eq!(summary.files, 1);
    assert_eq!(fs::read_to_string(&markdown)?, "```graphviz\na -> b\n```\n");
    assert_eq!(fs::read_to_string(&md)?, "```dot\nc -> d\n```\n");

    Ok(())
}

/// Test that the report file lists removed items when enabled
#[tokio::test]
async fn test_run_folder_withReportEnabled_shouldWriteReport() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    common::create_test_file(&root, "doc.md", "# Setup\ntext\n## Setup\n")?;

    let config = Config {
        write_report: true,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;
    let summary = controller.run(TransformKind::DedupHeaders, &root).await?;
    assert_eq!(summary.removed, 1);

    let report = fs::read_to_string(root.join(REPORT_FILE_NAME))?;
    assert!(report.contains("dedup-headers: 1 changed, 0 unchanged, 0 errors"));
    assert!(report.contains("doc.md"));
    assert!(report.contains("    - ## Setup"));

    Ok(())
}

/// Test that an empty directory is not an error
#[tokio::test]
async fn test_run_folder_withNoMatchingFiles_shouldReturnEmptySummary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(&temp_dir.path().to_path_buf(), "readme.txt", "text")?;

    let controller = Controller::new_for_test()?;
    let summary = controller.run(TransformKind::DedupFences, temp_dir.path()).await?;

    assert_eq!(summary.files, 0);
    assert_eq!(summary.changed, 0);

    Ok(())
}

/// Test processing a single file directly
#[tokio::test]
async fn test_process_file_withUnchangedContent_shouldNotWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "plain.md", &common::clean_markdown())?;
    let before = fs::metadata(&path)?.modified()?;

    let outcome = process_file(Arc::new(SentenceDeduplicator::default()), path.clone(), false).await?;

    assert!(!outcome.changed);
    assert!(!outcome.written);
    assert!(outcome.removed.is_empty());
    assert_eq!(fs::metadata(&path)?.modified()?, before);

    Ok(())
}

/// Test that a single input file is processed without walking its directory
#[tokio::test]
async fn test_run_withSingleFile_shouldOnlyTouchThatFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let target = common::create_test_markdown(&root, "target.md")?;
    let sibling = common::create_test_markdown(&root, "sibling.md")?;

    let controller = Controller::new_for_test()?;
    let summary = controller.run(TransformKind::DedupSentences, &target).await?;

    assert_eq!(summary.files, 1);
    assert_eq!(summary.changed, 1);
    assert_ne!(fs::read_to_string(&target)?, common::duplicated_markdown());
    assert_eq!(fs::read_to_string(&sibling)?, common::duplicated_markdown());

    Ok(())
}
