//! The `skillcheck run` command: batch-score an answer sheet.

use std::path::PathBuf;

use anyhow::{Context, Result};

use skillcheck_auth::{ProfileStore, User};
use skillcheck_core::error::EngineError;
use skillcheck_core::session::{AssessmentSession, SessionStatus};

use super::report::print_text;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    assessment_path: PathBuf,
    answers_path: PathBuf,
    elapsed_secs: Option<u64>,
    output: PathBuf,
    format: String,
    profile: Option<PathBuf>,
) -> Result<()> {
    let definition = skillcheck_core::parser::parse_assessment(&assessment_path)?;
    let answers = skillcheck_core::parser::parse_answer_sheet(&answers_path)?;

    println!(
        "Running '{}': {} questions, {} min, pass at {}%",
        definition.title,
        definition.questions.len(),
        definition.time_limit_minutes,
        definition.passing_score
    );

    let mut session = AssessmentSession::new(definition);
    session.start()?;

    for (question_id, answer) in answers {
        match session.submit_answer(&question_id, answer) {
            Ok(()) => {}
            Err(EngineError::UnknownQuestion(id)) => {
                tracing::warn!(question_id = %id, "answer sheet references unknown question, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    // Replay elapsed session time so the countdown applies to batch runs too.
    if let Some(secs) = elapsed_secs {
        for _ in 0..secs {
            session.tick()?;
            if session.status() == SessionStatus::Completed {
                println!("Time's up, your in-progress answers were auto-submitted.");
                break;
            }
        }
    }

    if session.status() != SessionStatus::Completed {
        session.submit()?;
    }
    let report = session
        .report()
        .cloned()
        .context("session completed without producing a report")?;

    print_text(&report);

    match format.as_str() {
        "json" => report.save_json(&output.join("report.json"))?,
        "markdown" => write_markdown(&report, &output)?,
        "html" => skillcheck_report::write_html_report(&report, &output.join("report.html"))?,
        "all" => {
            report.save_json(&output.join("report.json"))?;
            write_markdown(&report, &output)?;
            skillcheck_report::write_html_report(&report, &output.join("report.html"))?;
        }
        other => anyhow::bail!("unknown format '{other}' (expected json, markdown, html, all)"),
    }
    println!("Results written to {}", output.display());

    if let Some(profile_path) = profile {
        record_profile_score(&profile_path, report.total_score)?;
    }

    Ok(())
}

fn write_markdown(report: &skillcheck_core::report::ScoreReport, output: &PathBuf) -> Result<()> {
    let markdown = skillcheck_report::render_markdown(report);
    std::fs::create_dir_all(output)?;
    let path = output.join("report.md");
    std::fs::write(&path, markdown)
        .with_context(|| format!("failed to write Markdown report to {}", path.display()))?;
    Ok(())
}

/// Record the score on the profile, keeping the best across attempts.
fn record_profile_score(path: &PathBuf, score: u32) -> Result<()> {
    let store = ProfileStore::new(path);
    let mut user = store.load()?.unwrap_or_else(|| User::new("learner"));

    let improved = user.assessment_score.map_or(true, |best| score > best);
    if improved {
        user.assessment_score = Some(score);
    }
    user.completed_onboarding = true;
    store.save(&user)?;

    if improved {
        println!("Profile updated: new best score {score}% for {}", user.name);
    } else {
        println!(
            "Profile unchanged: best score remains {}%",
            user.assessment_score.unwrap_or(score)
        );
    }
    Ok(())
}
