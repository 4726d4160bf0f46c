//! Plain-text extraction from fetched pages
//!
//! Fetched documents go through two steps before analysis:
//! 1. `html_to_text` flattens the visible body text, one block per line
//! 2. `filter_lines` drops navigation/boilerplate lines and rejoins the rest
//!    with ". " so the segmenter sees sentence boundaries
//!
//! Text typed or piped in directly is analyzed as-is and never filtered.

use crate::error::ScanError;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::OnceLock;

/// Lines must be strictly longer than this (in chars) to survive
pub const MIN_LINE_CHARS: usize = 80;
/// Filtered text shorter than this means the extraction was blocked
pub const MIN_EXTRACTED_CHARS: usize = 100;
/// Filtered text is cut to this many chars
pub const MAX_EXTRACTED_CHARS: usize = 10_000;

/// Elements whose subtree never contributes visible text
const EXCLUDED_ELEMENTS: &[&str] = &[
    "script", "style", "meta", "link", "noscript", "iframe", "svg", "head", "template",
];

/// Elements rendered on their own line
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

fn word_regex() -> &'static Regex {
    static WORD_RE: OnceLock<Regex> = OnceLock::new();
    WORD_RE.get_or_init(|| Regex::new(r"[a-zA-Z]{4,}").unwrap())
}

fn is_substantive(line: &str) -> bool {
    line.chars().count() > MIN_LINE_CHARS && word_regex().is_match(line)
}

/// Keep substantive lines of raw page text and join them into one blob.
///
/// Fails with `ExtractionBlocked` when fewer than 100 chars survive; the
/// accepted text is truncated to its first 10,000 chars.
pub fn filter_lines(raw_text: &str) -> Result<String, ScanError> {
    let filtered = raw_text
        .split('\n')
        .map(str::trim)
        .filter(|line| is_substantive(line))
        .collect::<Vec<_>>()
        .join(". ");

    let length = filtered.chars().count();
    if length < MIN_EXTRACTED_CHARS {
        return Err(ScanError::ExtractionBlocked { length });
    }

    Ok(truncate_chars(&filtered, MAX_EXTRACTED_CHARS).to_string())
}

/// Longest prefix of `s` holding at most `max` chars
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Flatten the visible text of an HTML document's body.
///
/// Block-level elements start on a new line; runs of whitespace inside text
/// collapse to a single space.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut out = String::new();
    collect_text(root, &mut out);

    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if EXCLUDED_ELEMENTS.contains(&name) {
        return;
    }
    let is_block = BLOCK_ELEMENTS.contains(&name);
    if is_block {
        out.push('\n');
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(out, text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }

    if is_block {
        out.push('\n');
    }
}

fn push_text(out: &mut String, text: &str) {
    let starts_with_space = text.starts_with(char::is_whitespace);
    let ends_with_space = text.ends_with(char::is_whitespace);
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.is_empty() {
        if !text.is_empty() && !out.is_empty() && !out.ends_with(char::is_whitespace) {
            out.push(' ');
        }
        return;
    }
    if starts_with_space && !out.is_empty() && !out.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(&words.join(" "));
    if ends_with_space {
        out.push(' ');
    }
}

/// `html_to_text` followed by `filter_lines`
pub fn extract_document(html: &str) -> Result<String, ScanError> {
    filter_lines(&html_to_text(html))
}
