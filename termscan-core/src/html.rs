//! HTML report generation
//!
//! Generates a self-contained HTML report with embedded CSS. Risk cells are
//! filled with the tier's color; tier labels and narratives appear verbatim.

use crate::report::{ReportData, ReportRow};
use crate::risk::RiskTier;

/// Render a report as a standalone HTML document
pub fn render_html(report: &ReportData) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        {summary}
        {table}
        {footer}
    </div>
</body>
</html>"#,
        title = html_escape(&report.title),
        css = inline_css(),
        summary = render_summary(report),
        table = render_clause_table(&report.rows),
        footer = render_footer(),
    )
}

fn inline_css() -> String {
    let mut css = String::from(
        r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; background: #f9fafb; color: #1f2937; }
.container { max-width: 1000px; margin: 0 auto; padding: 24px; }
h1 { font-size: 1.6rem; margin-bottom: 16px; }
.summary { display: flex; flex-wrap: wrap; gap: 12px; margin-bottom: 24px; }
.summary-card { background: #fff; border-radius: 8px; padding: 12px 16px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); min-width: 120px; }
.summary-card h3 { margin: 0 0 4px; font-size: 0.8rem; text-transform: uppercase; color: #6b7280; }
.summary-card .value { font-size: 1.4rem; font-weight: 600; }
table { width: 100%; border-collapse: collapse; background: #fff; }
th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e5e7eb; vertical-align: top; font-size: 0.9rem; }
th { background: #1e40af; color: #fff; }
td.risk { font-weight: 600; white-space: nowrap; }
footer { margin-top: 24px; font-size: 0.8rem; color: #6b7280; }
"#,
    );
    for tier in RiskTier::ALL {
        let style = tier.style();
        let (r, g, b) = style.fill_rgb;
        css.push_str(&format!(
            ".{} {{ background: rgb({}, {}, {}); }}\n",
            style.css_class, r, g, b
        ));
    }
    css
}

fn render_summary(report: &ReportData) -> String {
    let mut cards = format!(
        r#"
    <div class="summary-card">
        <h3>Total Clauses</h3>
        <div class="value">{}</div>
    </div>"#,
        report.summary.total
    );
    for tier in RiskTier::ALL {
        cards.push_str(&format!(
            r#"
    <div class="summary-card {class}">
        <h3>{name} Risk</h3>
        <div class="value">{count}</div>
    </div>"#,
            class = tier.style().css_class,
            name = tier.label(),
            count = report.summary.count(tier),
        ));
    }
    format!("<div class=\"summary\">{}\n</div>", cards)
}

fn render_clause_table(rows: &[ReportRow]) -> String {
    if rows.is_empty() {
        return "<p>No clauses to show.</p>".to_string();
    }

    let body: String = rows
        .iter()
        .map(|row| {
            format!(
                r#"
        <tr id="clause-{id}">
            <td>{preview}</td>
            <td class="risk {class}">{label}</td>
            <td>{impact}</td>
        </tr>"#,
                id = row.id,
                preview = html_escape(row.preview.trim()),
                class = row.risk.style().css_class,
                label = html_escape(&row.label),
                impact = html_escape(&row.impact),
            )
        })
        .collect();

    format!(
        r#"<table>
    <thead>
        <tr><th>Clause</th><th>Risk</th><th>Impact</th></tr>
    </thead>
    <tbody>{}
    </tbody>
</table>"#,
        body
    )
}

fn render_footer() -> String {
    r#"<footer>
    <p>Generated by termscan. Keyword matching only; not legal advice.</p>
</footer>"#
        .to_string()
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
