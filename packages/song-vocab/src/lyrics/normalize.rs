//! Lyric text cleanup.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A newline, any whitespace (including more newlines), then a newline.
    static ref BLANK_RUN: Regex = Regex::new(r"\n\s*\n").expect("valid regex");
}

/// Collapse runs of blank lines to a single blank line and trim.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").trim().to_string()
}
