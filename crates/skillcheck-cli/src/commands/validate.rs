//! The `skillcheck validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(assessment_path: PathBuf) -> Result<()> {
    let definitions = if assessment_path.is_dir() {
        skillcheck_core::parser::load_assessment_directory(&assessment_path)?
    } else {
        vec![skillcheck_core::parser::parse_assessment(&assessment_path)?]
    };

    let mut total_warnings = 0;

    for definition in &definitions {
        println!(
            "Assessment: {} ({} questions, {} min, pass at {}%)",
            definition.title,
            definition.questions.len(),
            definition.time_limit_minutes,
            definition.passing_score
        );

        let warnings = skillcheck_core::parser::validate_assessment(definition);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All assessments valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
