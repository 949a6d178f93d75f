/*!
 * Collapsing of repeated fence marker lines.
 *
 * Generated Markdown sometimes carries the same fence line twice in a row
 * (for example two consecutive ```` ```mermaid ```` openers), which breaks
 * rendering. Only identical consecutive fence lines are collapsed.
 */

use super::segments::FENCE_MARKER;
use super::{TextTransform, TransformOutcome};

#[derive(Debug, Clone, Copy, Default)]
pub struct FenceDeduplicator;

impl FenceDeduplicator {
    pub fn remove_duplicates(&self, text: &str) -> TransformOutcome {
        let mut cleaned = String::with_capacity(text.len());
        let mut removed = Vec::new();
        let mut previous: Option<&str> = None;

        for line in text.split_inclusive('\n') {
            let trimmed = line.trim();
            if trimmed.starts_with(FENCE_MARKER) && previous == Some(trimmed) {
                removed.push(trimmed.to_string());
                continue;
            }
            cleaned.push_str(line);
            previous = Some(trimmed);
        }

        TransformOutcome {
            text: cleaned,
            removed,
        }
    }
}

impl TextTransform for FenceDeduplicator {
    fn name(&self) -> &'static str {
        "dedup-fences"
    }

    fn apply(&self, text: &str) -> TransformOutcome {
        self.remove_duplicates(text)
    }
}
