//! Markdown score summary.

use skillcheck_core::report::ScoreReport;

/// Render a score report as Markdown.
pub fn render_markdown(report: &ScoreReport) -> String {
    let mut md = String::new();

    let verdict = if report.passed { "PASSED" } else { "FAILED" };
    md.push_str(&format!(
        "**Result: {verdict}** — {}% (threshold {}%)\n\n",
        report.total_score, report.passing_score
    ));
    md.push_str(&format!(
        "{} of {} questions correct, {} answered.\n\n",
        report.correct_count, report.total_questions, report.total_answered
    ));

    if !report.per_category.is_empty() {
        md.push_str("### Category breakdown\n\n");
        md.push_str("| Category | Correct | Answered | Rate |\n");
        md.push_str("|----------|---------|----------|------|\n");
        for (category, stats) in &report.per_category {
            md.push_str(&format!(
                "| {} | {} | {} | {:.0}% |\n",
                category,
                stats.correct,
                stats.total,
                stats.ratio() * 100.0
            ));
        }
        md.push('\n');
    }

    if !report.strengths.is_empty() {
        let names: Vec<String> = report.strengths.iter().map(|c| c.to_string()).collect();
        md.push_str(&format!("**Strengths:** {}\n\n", names.join(", ")));
    }
    if !report.weaknesses.is_empty() {
        let names: Vec<String> = report.weaknesses.iter().map(|c| c.to_string()).collect();
        md.push_str(&format!("**Areas to review:** {}\n\n", names.join(", ")));
    }

    if report.certificate_eligible() {
        md.push_str("Certificate: eligible.\n");
    } else {
        md.push_str("Certificate: not available, score below threshold.\n");
    }

    md
}
