//! Deterministic cleanup of extracted text.
//!
//! Both extraction paths leak encoding artifacts into their output: embedded
//! text layers carry Windows line endings, soft hyphens, and zero-width
//! joiners from the authoring tool; OCR adds trailing whitespace and runs of
//! blank lines between detected blocks. These passes remove the artifacts
//! without touching content, so downstream stages (and the renderer's
//! line-splitting) see one consistent shape.
//!
//! Every rule is a pure `&str → String` function with no shared state,
//! applied in a fixed order: line endings first so the per-line passes see
//! `\n` only, blank-line collapsing last so it observes the trimmed lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all cleanup passes to raw extraction output.
pub fn clean_text(input: &str) -> String {
    let s = normalize_line_endings(input);
    let s = remove_invisible_chars(&s);
    let s = trim_trailing_whitespace(&s);
    collapse_blank_lines(&s)
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────

fn normalize_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Strip invisible Unicode ──────────────────────────────────────

// Zero-width space/joiner/non-joiner, word joiner, BOM, soft hyphen.
static RE_INVISIBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{200B}\u{200C}\u{200D}\u{2060}\u{FEFF}\u{00AD}]").unwrap());

fn remove_invisible_chars(input: &str) -> String {
    RE_INVISIBLE.replace_all(input, "").to_string()
}

// ── Rule 3: Trim trailing whitespace per line ────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 4: Collapse excessive blank lines ───────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{4,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n\n").to_string()
}
