//! HTML report generator.
//!
//! Produces a self-contained HTML page with all CSS inlined.

use std::path::Path;

use anyhow::{Context, Result};

use skillcheck_core::report::ScoreReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate a self-contained HTML page from a score report.
pub fn generate_html(report: &ScoreReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>skillcheck result</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header with verdict
    let (verdict, class) = if report.passed {
        ("Passed", "pass")
    } else {
        ("Failed", "fail")
    };
    html.push_str("<header>\n");
    html.push_str("<h1>Assessment result</h1>\n");
    html.push_str(&format!(
        "<p class=\"score {class}\">{}%</p>\n<p class=\"verdict {class}\">{verdict} (threshold {}%)</p>\n",
        report.total_score, report.passing_score
    ));
    html.push_str(&format!(
        "<p class=\"meta\">{} of {} correct | {} answered</p>\n",
        report.correct_count, report.total_questions, report.total_answered
    ));
    html.push_str("</header>\n");

    // Category breakdown
    html.push_str("<section>\n<h2>Categories</h2>\n");
    html.push_str("<table>\n<thead><tr><th>Category</th><th>Correct</th><th>Answered</th><th>Rate</th></tr></thead>\n<tbody>\n");
    for (category, stats) in &report.per_category {
        let label = if report.strengths.contains(category) {
            " <span class=\"tag strength\">strength</span>"
        } else if report.weaknesses.contains(category) {
            " <span class=\"tag weakness\">weakness</span>"
        } else {
            ""
        };
        html.push_str(&format!(
            "<tr><td>{}{label}</td><td>{}</td><td>{}</td><td>{:.0}%</td></tr>\n",
            html_escape(&category.to_string()),
            stats.correct,
            stats.total,
            stats.ratio() * 100.0,
        ));
    }
    html.push_str("</tbody></table>\n</section>\n");

    // Certificate line
    html.push_str("<footer>\n");
    if report.certificate_eligible() {
        html.push_str("<p>Certificate: eligible.</p>\n");
    } else {
        html.push_str("<p>Certificate: not available, score below threshold.</p>\n");
    }
    html.push_str("</footer>\n");

    html.push_str("</body>\n</html>\n");
    html
}

/// Write the HTML report to a file.
pub fn write_html_report(report: &ScoreReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: -apple-system, "Segoe UI", sans-serif; margin: 2rem auto; max-width: 720px; color: #1a1a2e; }
header { text-align: center; margin-bottom: 2rem; }
.score { font-size: 3rem; font-weight: 700; margin: 0.5rem 0 0; }
.verdict { font-size: 1.1rem; margin-top: 0; }
.pass { color: #0a7d38; }
.fail { color: #c22f2f; }
.meta { color: #666; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.4rem 0.8rem; border-bottom: 1px solid #ddd; }
.tag { font-size: 0.75rem; padding: 0.1rem 0.4rem; border-radius: 3px; }
.tag.strength { background: #d9f2e2; color: #0a7d38; }
.tag.weakness { background: #f8dcdc; color: #c22f2f; }
footer { margin-top: 2rem; color: #666; }
"#;
