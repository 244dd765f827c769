use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

// Non-greedy and line-bound: `.` never crosses a newline.
static REF_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").unwrap());

const PLACEHOLDER_IMAGE: &str = "https://picsum.photos/seed";

/// Strip reference markers like `[1]`, `[a]`, `[citation needed]` and trim.
pub fn clean_text(text: &str) -> String {
    REF_MARKER_RE.replace_all(text, "").trim().to_string()
}

/// All descendant text of a cell, concatenated as-is.
pub fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Header text: every text node trimmed, joined with no separator.
pub fn header_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

/// Lowercase, then replace every char that is not ASCII alphanumeric with `-`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Deterministic stand-in image keyed by name (spaces removed).
pub fn placeholder_image(name: &str) -> String {
    format!("{}/{}/800/600", PLACEHOLDER_IMAGE, name.replace(' ', ""))
}

/// Give protocol-relative sources (`//host/path`) an `https:` scheme.
pub fn absolutize(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{}", src)
    } else {
        src.to_string()
    }
}

// ── Tests ──
