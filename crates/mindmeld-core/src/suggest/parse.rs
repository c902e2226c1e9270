//! Suggestion response parsing.
//!
//! Models return their suggestions as a loosely formatted list: one per
//! line, usually prefixed with a bullet, dash, or numeral. Parsing splits
//! on newlines, drops blank lines, and strips leading list markers.

use regex::Regex;
use std::sync::LazyLock;

/// Leading list markers: bullets, dashes, digits, and dots, plus the
/// whitespace that follows them.
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•\d.]+\s*").expect("valid list marker regex"));

/// Split a raw completion into suggestion texts.
///
/// Blank lines are dropped; each surviving line loses its leading list
/// marker and surrounding whitespace. Lines that were nothing but a marker
/// are dropped too.
pub fn parse_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| LIST_MARKER.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
