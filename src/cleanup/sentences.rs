/*!
 * Sentence splitting and structural classification for prose segments.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentence-terminal punctuation followed by a whitespace run
static SENTENCE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]\s+").expect("Invalid sentence break regex")
});

/// A bare list ordinal such as `1.` or `2)`
static ORDINAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+[.)]\s*$").expect("Invalid ordinal regex")
});

/// Sentences shorter than this (trimmed, in characters) are never removed
pub const MIN_DROPPABLE_CHARS: usize = 15;

/// Sentences shorter than this (trimmed, in characters) never anchor a duplicate
pub const MIN_ANCHOR_CHARS: usize = 50;

/// Why a sentence is exempt from duplicate removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    /// Starts with `#`
    Heading,
    /// Starts with `*`
    Bullet,
    /// Only a list ordinal like `3.` or `4)`
    Ordinal,
    /// Starts with `-` and contains `:`
    ListInstruction,
    /// Contains `**`
    Bold,
    /// Shorter than [`MIN_DROPPABLE_CHARS`]
    Short,
}

/// Classification of a single sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceKind {
    /// Always kept, never compared against
    Protected(Protection),
    /// Can be dropped; anchors later comparisons only when long enough
    Ordinary { anchor: bool },
}

impl SentenceKind {
    pub fn is_protected(&self) -> bool {
        matches!(self, SentenceKind::Protected(_))
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, SentenceKind::Ordinary { anchor: true })
    }
}

/// Split a prose segment into sentences.
///
/// Each sentence keeps its terminal punctuation; the whitespace run after it is
/// the separator and belongs to neither side. Leading whitespace of the first
/// sentence and trailing whitespace of the final fragment are kept.
pub fn split_sentences(prose: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for separator in SENTENCE_BREAK_REGEX.find_iter(prose) {
        // terminal punctuation is a single ASCII byte
        let end = separator.start() + 1;
        sentences.push(&prose[start..end]);
        start = separator.end();
    }
    sentences.push(&prose[start..]);

    sentences
}

/// Classify a sentence by its trimmed text
pub fn classify(sentence: &str) -> SentenceKind {
    let trimmed = sentence.trim();

    if let Some(protection) = structural_protection(trimmed) {
        return SentenceKind::Protected(protection);
    }

    let length = trimmed.chars().count();
    if length < MIN_DROPPABLE_CHARS {
        return SentenceKind::Protected(Protection::Short);
    }

    SentenceKind::Ordinary {
        anchor: length >= MIN_ANCHOR_CHARS,
    }
}

fn structural_protection(trimmed: &str) -> Option<Protection> {
    if trimmed.starts_with('#') {
        Some(Protection::Heading)
    } else if trimmed.starts_with('*') {
        Some(Protection::Bullet)
    } else if ORDINAL_REGEX.is_match(trimmed) {
        Some(Protection::Ordinal)
    } else if trimmed.starts_with('-') && trimmed.contains(':') {
        Some(Protection::ListInstruction)
    } else if trimmed.contains("**") {
        Some(Protection::Bold)
    } else {
        None
    }
}
