/*!
 * Near-duplicate sentence removal.
 *
 * Walks each prose segment sentence by sentence and drops any sentence that
 * is more similar than the threshold to an earlier, long enough sentence of
 * the same segment. Fenced code is passed through untouched and structural
 * lines (headings, list markers, bold text, short sentences) are always kept.
 */

use log::trace;

use super::segments::{FencedCodeSegmenter, Segment, Segmenter};
use super::sentences::{classify, split_sentences};
use super::similarity;
use super::{TextTransform, TransformOutcome};

/// Threshold used when none (or an invalid one) is configured
pub const DEFAULT_SENTENCE_THRESHOLD: f64 = 0.8;

/// Sentence deduplicator with a fixed similarity threshold
#[derive(Debug, Clone)]
pub struct SentenceDeduplicator {
    threshold: f64,
}

impl Default for SentenceDeduplicator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SENTENCE_THRESHOLD,
        }
    }
}

impl SentenceDeduplicator {
    /// Create a deduplicator; the threshold is clamped to `[0.0, 1.0]`
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Remove later near-duplicate sentences from `text`.
    ///
    /// Returns the cleaned text and the dropped sentences (untrimmed, in
    /// document order). Kept sentences of a prose segment are re-joined with
    /// a single space.
    pub fn deduplicate(&self, text: &str) -> TransformOutcome {
        let mut removed = Vec::new();
        let mut cleaned = String::with_capacity(text.len());

        for segment in FencedCodeSegmenter.segment(text) {
            match segment {
                Segment::Code(code) => cleaned.push_str(code),
                Segment::Prose(prose) => {
                    cleaned.push_str(&self.deduplicate_prose(prose, &mut removed));
                }
            }
        }

        TransformOutcome {
            text: cleaned,
            removed,
        }
    }

    fn deduplicate_prose(&self, prose: &str, removed: &mut Vec<String>) -> String {
        let mut kept: Vec<&str> = Vec::new();
        // trimmed text of kept sentences that may anchor a duplicate
        let mut anchors: Vec<&str> = Vec::new();

        for sentence in split_sentences(prose) {
            let trimmed = sentence.trim();
            if trimmed.is_empty() {
                continue;
            }

            let kind = classify(sentence);
            if kind.is_protected() {
                kept.push(sentence);
                continue;
            }

            let duplicate_of = anchors
                .iter()
                .find(|anchor| similarity::exceeds(trimmed, anchor, self.threshold));

            match duplicate_of {
                Some(anchor) => {
                    trace!("Dropping {:?} as near-duplicate of {:?}", trimmed, anchor);
                    removed.push(sentence.to_string());
                }
                None => {
                    kept.push(sentence);
                    if kind.is_anchor() {
                        anchors.push(trimmed);
                    }
                }
            }
        }

        kept.join(" ")
    }
}

impl TextTransform for SentenceDeduplicator {
    fn name(&self) -> &'static str {
        "dedup-sentences"
    }

    fn apply(&self, text: &str) -> TransformOutcome {
        self.deduplicate(text)
    }
}

/// Remove near-duplicate sentences with the given threshold
pub fn deduplicate(text: &str, threshold: f64) -> (String, Vec<String>) {
    let outcome = SentenceDeduplicator::new(threshold).deduplicate(text);
    (outcome.text, outcome.removed)
}
