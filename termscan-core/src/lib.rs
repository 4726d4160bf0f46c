//! termscan core library - keyword risk classification for Terms & Conditions clauses

// Global invariants enforced in this crate:
// - Analysis is a pure function of the input text and the static lexicon
// - No global mutable state
// - Only the fetch module performs I/O
// - Identical input yields byte-for-byte identical output

pub mod analysis;
pub mod chat;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod html;
pub mod lexicon;
pub mod report;
pub mod risk;
pub mod segment;

pub use analysis::{analyze, AnalysisResult, Clause, ClauseFilter, TierCounts};
pub use config::ResolvedConfig;
pub use error::ScanError;
pub use extract::{filter_lines, html_to_text};
pub use fetch::{fetch_document, FetchOptions};
pub use report::{build_report, render_json, render_text, ReportData};
pub use risk::{classify, RiskTier};
pub use segment::segment;

/// Fetch a page, extract its text and analyze it
pub fn analyze_url(url: &str, options: &FetchOptions) -> Result<AnalysisResult, ScanError> {
    let text = fetch_document(url, options)?;
    Ok(analyze(&text))
}
