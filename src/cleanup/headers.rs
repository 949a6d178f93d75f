/*!
 * Removal of repeated Markdown headers.
 *
 * Header text is normalized (lowercase, punctuation stripped, whitespace
 * collapsed) and compared against every header kept so far. A header whose
 * similarity reaches the threshold is dropped along with its line ending.
 * Lines inside fenced code blocks are never treated as headers.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::segments::FENCE_MARKER;
use super::similarity;
use super::{TextTransform, TransformOutcome};

/// Threshold used when none (or an invalid one) is configured
pub const DEFAULT_HEADER_THRESHOLD: f64 = 0.85;

/// Regex for an ATX header line (line ending already removed)
static HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#{1,6}\s*(.+)$").expect("Invalid header regex")
});

/// Header deduplicator with a fixed similarity threshold
#[derive(Debug, Clone)]
pub struct HeaderDeduplicator {
    threshold: f64,
}

impl Default for HeaderDeduplicator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_HEADER_THRESHOLD,
        }
    }
}

impl HeaderDeduplicator {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn remove_duplicates(&self, text: &str) -> TransformOutcome {
        let mut seen: Vec<String> = Vec::new();
        let mut removed = Vec::new();
        let mut cleaned = String::with_capacity(text.len());
        let mut in_code = false;

        for line in text.split_inclusive('\n') {
            let content = line.strip_suffix('\n').unwrap_or(line);

            if content.trim_start().starts_with(FENCE_MARKER) {
                in_code = !in_code;
                cleaned.push_str(line);
                continue;
            }

            if !in_code {
                if let Some(header_text) = header_text(content) {
                    let normalized = normalize_header(header_text);
                    let duplicate = seen
                        .iter()
                        .any(|kept| similarity::ratio(&normalized, kept) >= self.threshold);
                    if duplicate {
                        removed.push(content.trim().to_string());
                        continue;
                    }
                    seen.push(normalized);
                }
            }

            cleaned.push_str(line);
        }

        TransformOutcome {
            text: cleaned,
            removed,
        }
    }
}

impl TextTransform for HeaderDeduplicator {
    fn name(&self) -> &'static str {
        "dedup-headers"
    }

    fn apply(&self, text: &str) -> TransformOutcome {
        self.remove_duplicates(text)
    }
}

/// Trimmed header text of a line, if the line is a header
fn header_text(line: &str) -> Option<&str> {
    HEADER_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|text| text.as_str().trim())
}

/// Normalize header text for comparison
pub fn normalize_header(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
