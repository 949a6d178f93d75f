use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::cleanup::{TextTransform, TransformKind};
use crate::errors::{AppError, FileError};
use crate::file_utils::FileManager;

// @module: Application controller for document cleanup

/// Name of the report file written into processed directories
pub const REPORT_FILE_NAME: &str = "mdtidy.report.log";

/// What happened to a single file
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    /// Processed file
    pub path: PathBuf,
    /// Whether the transform changed the content
    pub changed: bool,
    /// Whether the new content was written back (false in dry-run mode)
    pub written: bool,
    /// Items removed by the transform, in document order
    pub removed: Vec<String>,
}

/// Totals for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub files: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub removed: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    fn record(&mut self, result: &std::result::Result<FileOutcome, FileError>) {
        self.files += 1;
        match result {
            Ok(outcome) if outcome.changed => {
                self.changed += 1;
                self.removed += outcome.removed.len();
            }
            Ok(_) => self.unchanged += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Main application controller for document cleanup
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Report changes without writing files
    dry_run: bool,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            dry_run: false,
        })
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Build the transform for `kind` with the configured thresholds
    pub fn transform_for(&self, kind: TransformKind) -> Arc<dyn TextTransform> {
        kind.build(
            self.config.effective_sentence_threshold(),
            self.config.effective_header_threshold(),
        )
    }

    /// Run a transform over a single file or a whole directory tree
    pub async fn run(&self, kind: TransformKind, input: &Path) -> Result<RunSummary> {
        if !input.exists() {
            return Err(AppError::MissingInput(input.to_path_buf()).into());
        }

        if input.is_dir() {
            return self.run_folder(kind, input).await;
        }

        let start_time = Instant::now();
        let transform = self.transform_for(kind);
        info!("🧹 mdtidy: {} - {}", kind, input.display());

        let result = process_file(transform, input.to_path_buf(), self.dry_run).await;
        let mut summary = RunSummary::default();
        summary.record(&result);
        self.report_result(kind, &result);
        summary.elapsed = start_time.elapsed();

        if let Ok(outcome) = &result {
            let report_dir = input.parent().unwrap_or(Path::new("."));
            self.write_report(kind, report_dir, std::slice::from_ref(outcome), &summary);
        }

        Ok(summary)
    }

    /// Run a transform over every matching file below `input_dir`
    ///
    /// Per-file faults are logged and counted; they never abort the run.
    pub async fn run_folder(&self, kind: TransformKind, input_dir: &Path) -> Result<RunSummary> {
        let start_time = Instant::now();

        if !input_dir.exists() {
            return Err(AppError::MissingInput(input_dir.to_path_buf()).into());
        }

        let extensions = self.config.normalized_extensions();
        let files = FileManager::find_files(input_dir, &extensions, self.config.follow_links)?;

        if files.is_empty() {
            warn!("No files with extension(s) {} found in directory: {:?}", extensions.join(", "), input_dir);
            return Ok(RunSummary {
                elapsed: start_time.elapsed(),
                ..RunSummary::default()
            });
        }

        let transform = self.transform_for(kind);
        info!("🧹 mdtidy: {} - {} file(s) in {}", kind, files.len(), input_dir.display());
        if self.dry_run {
            info!("Dry run: no files will be modified");
        }

        // Create a progress bar for folder processing
        let folder_pb = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let dry_run = self.dry_run;
        let mut results = stream::iter(files.into_iter().enumerate())
            .map(|(index, path)| {
                let transform = Arc::clone(&transform);
                let pb = folder_pb.clone();
                async move {
                    let result = process_file(transform, path, dry_run).await;
                    pb.inc(1);
                    (index, result)
                }
            })
            .buffer_unordered(self.config.concurrent_files)
            .collect::<Vec<_>>()
            .await;

        folder_pb.finish_and_clear();

        // Report in walk order
        results.sort_by_key(|(index, _)| *index);

        let mut summary = RunSummary::default();
        let mut outcomes = Vec::new();
        for (_, result) in results {
            summary.record(&result);
            self.report_result(kind, &result);
            if let Ok(outcome) = result {
                outcomes.push(outcome);
            }
        }
        summary.elapsed = start_time.elapsed();

        info!(
            "Processing completed: {} files, {} changed, {} unchanged, {} errors, {} {} removed ({})",
            summary.files,
            summary.changed,
            summary.unchanged,
            summary.failed,
            summary.removed,
            kind.removed_label(),
            Self::format_duration(summary.elapsed)
        );

        self.write_report(kind, input_dir, &outcomes, &summary);

        Ok(summary)
    }

    fn report_result(&self, kind: TransformKind, result: &std::result::Result<FileOutcome, FileError>) {
        match result {
            Ok(outcome) if outcome.changed => {
                if outcome.written {
                    info!("Updated: {}", outcome.path.display());
                } else {
                    info!("Would update (dry run): {}", outcome.path.display());
                }
                if !outcome.removed.is_empty() {
                    info!("Removed {} {}:", outcome.removed.len(), kind.removed_label());
                    for item in &outcome.removed {
                        info!("- {}", item.trim());
                    }
                }
            }
            Ok(outcome) => debug!("No changes: {}", outcome.path.display()),
            Err(e) => error!("Error processing file {}: {}", e.path().display(), e),
        }
    }

    /// Append a report of changed files to the report file in `dir`
    fn write_report(&self, kind: TransformKind, dir: &Path, outcomes: &[FileOutcome], summary: &RunSummary) {
        if !self.config.write_report || self.dry_run || summary.changed == 0 {
            return;
        }

        let report_path = dir.join(REPORT_FILE_NAME);
        let content = Self::format_report(kind, outcomes, summary);

        if let Err(e) = FileManager::append_to_log_file(&report_path, &content) {
            warn!("Failed to write report to file: {}", e);
        } else {
            info!("Report written to {}", report_path.display());
        }
    }

    /// Report body listing changed files and their removed items
    pub fn format_report(kind: TransformKind, outcomes: &[FileOutcome], summary: &RunSummary) -> String {
        let mut content = format!(
            "{}: {} changed, {} unchanged, {} errors\n",
            kind, summary.changed, summary.unchanged, summary.failed
        );

        for outcome in outcomes.iter().filter(|outcome| outcome.changed) {
            content.push_str(&format!("[CHANGED] {}\n", outcome.path.display()));
            for item in &outcome.removed {
                content.push_str(&format!("    - {}\n", item.trim()));
            }
        }

        content
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Read one file, apply the transform on the blocking pool, write back if changed
pub async fn process_file(
    transform: Arc<dyn TextTransform>,
    path: PathBuf,
    dry_run: bool,
) -> std::result::Result<FileOutcome, FileError> {
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| FileError::Read { path: path.clone(), source })?;

    let (original, outcome) = tokio::task::spawn_blocking(move || {
        let outcome = transform.apply(&content);
        (content, outcome)
    })
    .await
    .map_err(|e| FileError::Worker {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let changed = outcome.text != original;
    let written = changed && !dry_run;
    if written {
        tokio::fs::write(&path, &outcome.text)
            .await
            .map_err(|source| FileError::Write { path: path.clone(), source })?;
    }

    Ok(FileOutcome {
        path,
        changed,
        written,
        removed: outcome.removed,
    })
}
