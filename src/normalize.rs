//! Text canonicalization used before comparisons
//!
//! Regex rules see the raw input instead; every other strategy compares
//! against [`normalize`]d text.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Trim surrounding whitespace and lower-case. Never fails.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// [`normalize`] for optional input; `None` becomes the empty string
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Split a keyword rule pattern on commas, trimming and dropping blanks.
///
/// Keywords are lower-cased so they compare against normalized input.
pub fn split_keywords(pattern: &str) -> Vec<String> {
    pattern
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Lower-cased word-character runs of `text` ("Trip Planning" -> ["trip", "planning"])
pub fn word_tokens(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}
