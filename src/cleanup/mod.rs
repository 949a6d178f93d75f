/*!
 * Markdown text cleanup transforms.
 *
 * This module contains the text transformations applied to each document:
 * - `dedup`: Near-duplicate sentence removal (fenced code is never touched)
 * - `headers`: Removal of repeated headers
 * - `fences`: Collapsing of repeated fence marker lines
 * - `rewrite`: Pattern rewrites (DOT fence tags, math brackets, Mermaid fixes)
 *
 * Supporting modules:
 * - `segments`: Code/prose decomposition of a document
 * - `sentences`: Sentence splitting and structural classification
 * - `similarity`: Longest-matching-block similarity ratio
 *
 * Every transform is a pure function over the document text; reading and
 * writing files is the controller's job.
 */

pub mod dedup;
pub mod fences;
pub mod headers;
pub mod rewrite;
pub mod segments;
pub mod sentences;
pub mod similarity;

use std::fmt;
use std::sync::Arc;

pub use dedup::{DEFAULT_SENTENCE_THRESHOLD, SentenceDeduplicator, deduplicate};
pub use fences::FenceDeduplicator;
pub use headers::{DEFAULT_HEADER_THRESHOLD, HeaderDeduplicator};
pub use rewrite::{DotRetagger, MathBracketFixer, MermaidRepair};
pub use segments::{FencedCodeSegmenter, Segment, Segmenter};

/// Result of applying a transform to one document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransformOutcome {
    /// The transformed document
    pub text: String,
    /// Items the transform dropped, in document order
    pub removed: Vec<String>,
}

impl TransformOutcome {
    /// Outcome of a transform that rewrites text without dropping items
    pub fn rewritten(text: String) -> Self {
        Self {
            text,
            removed: Vec::new(),
        }
    }
}

/// A document-level text transformation
pub trait TextTransform: Send + Sync {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Apply the transform to a whole document
    fn apply(&self, text: &str) -> TransformOutcome;
}

/// Available transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    DedupSentences,
    DedupHeaders,
    DedupFences,
    RetagDot,
    FixMath,
    FixMermaid,
}

impl TransformKind {
    /// Build the transform; thresholds are only used by the deduplicators
    pub fn build(self, sentence_threshold: f64, header_threshold: f64) -> Arc<dyn TextTransform> {
        match self {
            Self::DedupSentences => Arc::new(SentenceDeduplicator::new(sentence_threshold)),
            Self::DedupHeaders => Arc::new(HeaderDeduplicator::new(header_threshold)),
            Self::DedupFences => Arc::new(FenceDeduplicator),
            Self::RetagDot => Arc::new(DotRetagger),
            Self::FixMath => Arc::new(MathBracketFixer),
            Self::FixMermaid => Arc::new(MermaidRepair),
        }
    }

    // @returns: Label for removed items in reports
    pub fn removed_label(&self) -> &'static str {
        match self {
            Self::DedupSentences => "sentences",
            Self::DedupHeaders => "headers",
            Self::DedupFences => "fence lines",
            Self::RetagDot | Self::FixMath | Self::FixMermaid => "items",
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DedupSentences => "dedup-sentences",
            Self::DedupHeaders => "dedup-headers",
            Self::DedupFences => "dedup-fences",
            Self::RetagDot => "retag-dot",
            Self::FixMath => "fix-math",
            Self::FixMermaid => "fix-mermaid",
        };
        write!(f, "{}", name)
    }
}
