/*!
 * Splitting documents into fenced code and prose segments.
 *
 * A fenced region runs from a triple-backtick marker to the next one and is
 * captured verbatim, markers included. Everything between regions is prose.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Triple-backtick fence marker
pub const FENCE_MARKER: &str = "```";

/// Regex for a complete fenced region (shortest span between two markers)
static FENCED_REGION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```.*?```").expect("Invalid fenced region regex")
});

/// One piece of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Fenced code, never modified or scanned
    Code(&'a str),
    /// Ordinary text
    Prose(&'a str),
}

impl<'a> Segment<'a> {
    /// The original text of this segment
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Code(text) | Segment::Prose(text) => text,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Segment::Code(_))
    }
}

/// Capability for decomposing a document into code and prose blocks
pub trait Segmenter {
    /// Ordered segments whose concatenation is exactly `text`
    fn segment<'a>(&self, text: &'a str) -> Vec<Segment<'a>>;
}

/// Segmenter for triple-backtick fences
///
/// An opening marker without a closing one turns the rest of the document
/// into a single code segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedCodeSegmenter;

impl Segmenter for FencedCodeSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for region in FENCED_REGION_REGEX.find_iter(text) {
            if region.start() > cursor {
                segments.push(Segment::Prose(&text[cursor..region.start()]));
            }
            segments.push(Segment::Code(region.as_str()));
            cursor = region.end();
        }

        let tail = &text[cursor..];
        match tail.find(FENCE_MARKER) {
            Some(open) => {
                if open > 0 {
                    segments.push(Segment::Prose(&tail[..open]));
                }
                segments.push(Segment::Code(&tail[open..]));
            }
            None if !tail.is_empty() => segments.push(Segment::Prose(tail)),
            None => {}
        }

        segments
    }
}

/// Segment `text` with the default fenced-code segmenter
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    FencedCodeSegmenter.segment(text)
}
