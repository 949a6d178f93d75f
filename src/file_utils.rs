use anyhow::{Context, Result, bail};
use chrono::Local;
use log::warn;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: Document discovery and report files

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    /// Whether the file extension matches one of `extensions` (case-insensitive, no dots)
    pub fn has_extension<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
        path.as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| extensions.iter().any(|wanted| ext.eq_ignore_ascii_case(wanted)))
    }

    /// Documents below `dir` with one of `extensions`, sorted by name at every level.
    ///
    /// A missing root is an error. Entries that cannot be read further down
    /// (permissions, broken links, link loops) are logged and skipped.
    pub fn find_files<P: AsRef<Path>>(dir: P, extensions: &[String], follow_links: bool) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            bail!("Not a directory: {}", dir.display());
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(dir).follow_links(follow_links).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() && Self::has_extension(entry.path(), extensions) => {
                    documents.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry below {}: {}", dir.display(), e),
            }
        }

        Ok(documents)
    }

    /// Append a timestamped entry to a report file, creating it and its parents
    pub fn append_to_log_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory: {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open report file: {}", path.display()))?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "[{}] {}", timestamp, content)
            .with_context(|| format!("Failed to write report file: {}", path.display()))
    }
}
