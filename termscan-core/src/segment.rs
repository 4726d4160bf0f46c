//! Sentence segmentation
//!
//! A segment is a maximal run of characters that are neither sentence
//! terminators (`.`, `!`, `?`) nor newlines, followed by exactly one
//! terminator. Text after the last terminator is dropped.

use regex::Regex;
use std::sync::OnceLock;

fn clause_regex() -> &'static Regex {
    static CLAUSE_RE: OnceLock<Regex> = OnceLock::new();
    CLAUSE_RE.get_or_init(|| Regex::new(r"[^.!?\n]+[.!?]").unwrap())
}

/// Split text into candidate clauses, in order of appearance.
///
/// Segments are returned verbatim (untrimmed) with their terminator.
pub fn segment(text: &str) -> Vec<&str> {
    clause_regex()
        .find_iter(text)
        .map(|m| m.as_str())
        .collect()
}
