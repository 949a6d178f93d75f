/*!
 * Pattern rewrites that never drop content.
 *
 * - `DotRetagger`: ```` ```dot ```` fences become ```` ```graphviz ````
 * - `MathBracketFixer`: LaTeX `\[` and `\]` become `$$`
 * - `MermaidRepair`: offline fixes for common Mermaid syntax slips
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::{TextTransform, TransformOutcome};

static DOT_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)```dot\b").expect("Invalid dot fence regex")
});

static MERMAID_OPENER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```mermaid\s+").expect("Invalid mermaid opener regex")
});

static SPACE_BEFORE_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+```").expect("Invalid fence spacing regex")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct DotRetagger;

impl TextTransform for DotRetagger {
    fn name(&self) -> &'static str {
        "retag-dot"
    }

    fn apply(&self, text: &str) -> TransformOutcome {
        TransformOutcome::rewritten(DOT_FENCE_REGEX.replace_all(text, "```graphviz").into_owned())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MathBracketFixer;

impl TextTransform for MathBracketFixer {
    fn name(&self) -> &'static str {
        "fix-math"
    }

    fn apply(&self, text: &str) -> TransformOutcome {
        TransformOutcome::rewritten(text.replace("\\[", "$$").replace("\\]", "$$"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRepair;

impl TextTransform for MermaidRepair {
    fn name(&self) -> &'static str {
        "fix-mermaid"
    }

    fn apply(&self, text: &str) -> TransformOutcome {
        let text = text
            .replace("\\(", "(")
            .replace("\\)", ")")
            .replace("|>", "|");
        let text = MERMAID_OPENER_REGEX.replace_all(&text, "```mermaid\n");
        let text = SPACE_BEFORE_FENCE_REGEX.replace_all(&text, "\n```");
        TransformOutcome::rewritten(text.into_owned())
    }
}
