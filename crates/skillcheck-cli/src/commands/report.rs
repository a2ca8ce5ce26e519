//! The `skillcheck report` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use skillcheck_core::report::ScoreReport;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = ScoreReport::load_json(&report_path)?;

    match format.as_str() {
        "markdown" => println!("{}", skillcheck_report::render_markdown(&report)),
        "text" => print_text(&report),
        other => anyhow::bail!("unknown format '{other}' (expected text or markdown)"),
    }

    Ok(())
}

/// Print the terminal summary used by both `run` and `report`.
pub fn print_text(report: &ScoreReport) {
    let verdict = if report.passed { "PASSED" } else { "FAILED" };
    println!(
        "Score: {}% - {verdict} (threshold {}%)",
        report.total_score, report.passing_score
    );
    println!(
        "{} of {} questions correct, {} answered",
        report.correct_count, report.total_questions, report.total_answered
    );

    if !report.per_category.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Category", "Correct", "Answered", "Rate"]);
        for (category, stats) in &report.per_category {
            table.add_row(vec![
                Cell::new(category),
                Cell::new(stats.correct),
                Cell::new(stats.total),
                Cell::new(format!("{:.0}%", stats.ratio() * 100.0)),
            ]);
        }
        println!("{table}");
    }

    if !report.strengths.is_empty() {
        let names: Vec<String> = report.strengths.iter().map(|c| c.to_string()).collect();
        println!("Strengths: {}", names.join(", "));
    }
    if !report.weaknesses.is_empty() {
        let names: Vec<String> = report.weaknesses.iter().map(|c| c.to_string()).collect();
        println!("Areas to review: {}", names.join(", "));
    }

    if report.certificate_eligible() {
        println!("Certificate: eligible");
    } else {
        println!("Certificate: not available, score below threshold");
    }
}
