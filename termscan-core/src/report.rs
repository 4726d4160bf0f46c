//! Report data and text/JSON output
//!
//! Global invariants enforced:
//! - Rows keep clause order
//! - Summary counts always cover every clause, even when rows are filtered
//! - Byte-for-byte identical output across runs

use crate::analysis::{AnalysisResult, ClauseFilter, TierCounts};
use crate::extract::truncate_chars;
use crate::risk::RiskTier;
use serde::{Deserialize, Serialize};

pub const REPORT_TITLE: &str = "T&C Threat Analyzer Report";
/// Clause previews longer than this are cut and marked with "..."
pub const PREVIEW_CHARS: usize = 80;

/// Summary block of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl ReportSummary {
    fn from_counts(total: usize, counts: TierCounts) -> Self {
        ReportSummary {
            total,
            low: counts.low,
            medium: counts.medium,
            high: counts.high,
            critical: counts.critical,
        }
    }

    pub fn count(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Medium => self.medium,
            RiskTier::High => self.high,
            RiskTier::Critical => self.critical,
        }
    }
}

/// One display row: preview, tier label and narrative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub id: usize,
    pub preview: String,
    pub risk: RiskTier,
    pub label: String,
    pub impact: String,
}

/// Everything a renderer needs; contains no styling decisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub title: String,
    pub summary: ReportSummary,
    pub rows: Vec<ReportRow>,
}

impl ReportData {
    /// Drop rows the filter rejects; the summary is kept as-is
    pub fn filtered(&self, filter: &ClauseFilter) -> ReportData {
        ReportData {
            title: self.title.clone(),
            summary: self.summary,
            rows: self
                .rows
                .iter()
                .filter(|row| filter.matches(row.risk))
                .cloned()
                .collect(),
        }
    }
}

/// Shape an analysis result into report rows and summary
pub fn build_report(result: &AnalysisResult) -> ReportData {
    let rows = result
        .clauses
        .iter()
        .map(|clause| ReportRow {
            id: clause.id,
            preview: preview(&clause.text),
            risk: clause.risk,
            label: clause.risk.label().to_string(),
            impact: clause.impact.clone(),
        })
        .collect();

    ReportData {
        title: REPORT_TITLE.to_string(),
        summary: ReportSummary::from_counts(result.len(), result.summary()),
        rows,
    }
}

/// Clause text cut to 80 chars, with "..." appended when cut
pub fn preview(text: &str) -> String {
    let cut = truncate_chars(text, PREVIEW_CHARS);
    if cut.len() < text.len() {
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Render a report as text output
pub fn render_text(report: &ReportData) -> String {
    let mut output = String::new();
    let s = &report.summary;

    output.push_str(&format!("{}\n\n", report.title));
    output.push_str(&format!("Total Clauses: {}\n", s.total));
    for tier in RiskTier::ALL.iter().rev() {
        output.push_str(&format!(
            "{:<14} {}\n",
            format!("{} Risk:", capitalize(tier.as_str())),
            s.count(*tier)
        ));
    }
    output.push('\n');

    if report.rows.is_empty() {
        output.push_str("No clauses to show.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<5} {:<4} {:<9} {:<60} {}\n",
        "ID", "", "RISK", "CLAUSE", "IMPACT"
    ));
    for row in &report.rows {
        output.push_str(&format!(
            "{:<5} {:<4} {:<9} {:<60} {}\n",
            row.id,
            row.risk.style().marker,
            row.label,
            truncate_or_pad(row.preview.trim(), 60),
            row.impact
        ));
    }

    output
}

/// Render a report as JSON output
pub fn render_json(report: &ReportData) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        format!("{}...", truncate_chars(s, width.saturating_sub(3)))
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    const SAMPLE: &str = "We collect cookies for preferences. We may share your personal information with third parties. By using this service you agree to binding arbitration.";

    #[test]
    fn test_build_report_summary() {
        let report = build_report(&analyze(SAMPLE));
        assert_eq!(
            report.summary,
            ReportSummary {
                total: 3,
                low: 1,
                medium: 0,
                high: 1,
                critical: 1
            }
        );
        let labels: Vec<_> = report.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["LOW", "HIGH", "CRITICAL"]);
    }

    #[test]
    fn test_preview_short_clause_unchanged() {
        assert_eq!(preview("We sell data."), "We sell data.");
        let exact = "a".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&exact), exact);
    }

    #[test]
    fn test_preview_long_clause_truncated() {
        let long = "b".repeat(PREVIEW_CHARS + 1);
        let p = preview(&long);
        assert_eq!(p, format!("{}...", "b".repeat(PREVIEW_CHARS)));
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        let long = "é".repeat(PREVIEW_CHARS + 5);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_filtered_keeps_summary() {
        let report = build_report(&analyze(SAMPLE));
        let filter = ClauseFilter {
            tier: Some(RiskTier::Critical),
            min_risk: None,
        };
        let filtered = report.filtered(&filter);
        assert_eq!(filtered.summary, report.summary);
        assert_eq!(filtered.rows.len(), 1);
        assert_eq!(filtered.rows[0].id, 2);
    }

    #[test]
    fn test_render_text_lists_counts_and_rows() {
        let text = render_text(&build_report(&analyze(SAMPLE)));
        assert!(text.starts_with(REPORT_TITLE));
        assert!(text.contains("Total Clauses: 3"));
        assert!(text.contains("Critical Risk: 1"));
        assert!(text.contains("Medium Risk:   0"));
        assert!(text.contains("binding arbitration"));
        assert!(text.contains("Can result in loss of privacy, legal rights, or financial risk."));
    }

    #[test]
    fn test_render_text_empty() {
        let text = render_text(&build_report(&analyze("")));
        assert!(text.contains("Total Clauses: 0"));
        assert!(text.contains("No clauses to show."));
    }

    #[test]
    fn test_render_json_round_trips() {
        let report = build_report(&analyze(SAMPLE));
        let json = render_json(&report);
        let parsed: ReportData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
        assert!(json.contains("\"risk\": \"critical\""));
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render_json(&build_report(&analyze(SAMPLE)));
        let b = render_json(&build_report(&analyze(SAMPLE)));
        assert_eq!(a, b);
    }
}
