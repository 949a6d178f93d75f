/*!
 * # mdtidy - Markdown cleanup toolkit
 *
 * A Rust library for bulk cleanup of Markdown documents.
 *
 * ## Features
 *
 * - Remove near-duplicate sentences while leaving fenced code, headings,
 *   list markers, bold text and short sentences alone
 * - Remove repeated headers
 * - Collapse repeated fence marker lines
 * - Retag ```` ```dot ```` fences as ```` ```graphviz ````
 * - Convert LaTeX `\[ \]` display math to `$$`
 * - Repair common Mermaid syntax slips offline
 * - Process single files or whole directory trees concurrently
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management and threshold policy
 * - `app_controller`: Directory walking, per-file processing and reporting
 * - `cleanup`: The text transforms:
 *   - `cleanup::dedup`: Near-duplicate sentence removal
 *   - `cleanup::segments`: Code/prose decomposition
 *   - `cleanup::sentences`: Sentence splitting and classification
 *   - `cleanup::similarity`: Longest-matching-block similarity
 *   - `cleanup::headers`, `cleanup::fences`, `cleanup::rewrite`: Line and pattern fixes
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod cleanup;
pub mod errors;
pub mod file_utils;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, FileOutcome, RunSummary};
pub use cleanup::{TextTransform, TransformKind, TransformOutcome, deduplicate};
pub use errors::{AppError, ConfigError, FileError};
