//! TOML assessment authoring format.
//!
//! Loads assessment definitions and answer sheets from TOML files and
//! directories, and lints definitions for authoring mistakes that the hard
//! invariants cannot catch.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::answer::Answer;
use crate::error::ValidationError;
use crate::model::{AssessmentDefinition, Category, CodeCheck, Difficulty, Question, QuestionKind};

/// Intermediate TOML structure for assessment files.
#[derive(Debug, Deserialize)]
struct TomlAssessmentFile {
    assessment: TomlAssessmentHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlAssessmentHeader {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_time_limit")]
    time_limit_minutes: u64,
    #[serde(default = "default_passing_score")]
    passing_score: u32,
}

fn default_time_limit() -> u64 {
    30
}

fn default_passing_score() -> u32 {
    70
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    text: String,
    category: String,
    difficulty: String,
    #[serde(default = "default_points")]
    points: u32,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    correct_feedback: Option<String>,
    #[serde(default)]
    incorrect_feedback: Option<String>,

    // multiple_choice
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_option: Option<usize>,

    // true_false
    #[serde(default)]
    correct: Option<bool>,

    // code_completion / bug_fix
    #[serde(default)]
    code_snippet: Option<String>,
    #[serde(default)]
    buggy_code: Option<String>,
    #[serde(default)]
    check: Option<TomlCheck>,
    #[serde(default)]
    hints: Vec<String>,

    // short_answer
    #[serde(default)]
    acceptable: Vec<String>,
    #[serde(default)]
    case_sensitive: bool,

    // drag_drop
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    correct_order: Vec<usize>,

    // matching
    #[serde(default)]
    terms: Vec<String>,
    #[serde(default)]
    definitions: Vec<String>,
    #[serde(default)]
    pairs: Vec<(usize, usize)>,
}

fn default_points() -> u32 {
    5
}

/// Declarative code-check description, compiled into a [`CodeCheck`] predicate.
#[derive(Debug, Deserialize)]
struct TomlCheck {
    mode: String,
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    min_matches: Option<usize>,
}

impl TomlCheck {
    fn compile(self, question_id: &str) -> Result<CodeCheck> {
        match self.mode.as_str() {
            "any_pattern" => CodeCheck::any_pattern(&self.patterns).map_err(|e| {
                anyhow::Error::new(ValidationError::InvalidPattern {
                    id: question_id.to_string(),
                    message: e.to_string(),
                })
            }),
            "keywords" => {
                let min = self.min_matches.unwrap_or(self.keywords.len());
                Ok(CodeCheck::keywords(self.keywords, min))
            }
            "any_keyword" => Ok(CodeCheck::any_keyword(self.keywords)),
            other => anyhow::bail!("question '{question_id}': unknown check mode '{other}'"),
        }
    }
}

/// Parse a single TOML file into an `AssessmentDefinition`.
pub fn parse_assessment(path: &Path) -> Result<AssessmentDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read assessment file: {}", path.display()))?;

    parse_assessment_str(&content, path)
}

/// Parse a TOML string into an `AssessmentDefinition` (useful for testing).
pub fn parse_assessment_str(content: &str, source_path: &Path) -> Result<AssessmentDefinition> {
    let parsed: TomlAssessmentFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(build_question)
        .collect::<Result<Vec<_>>>()?;

    let definition = AssessmentDefinition::new(
        parsed.assessment.id,
        parsed.assessment.title,
        parsed.assessment.description,
        parsed.assessment.time_limit_minutes,
        parsed.assessment.passing_score,
        questions,
    )?;

    Ok(definition)
}

fn build_question(q: TomlQuestion) -> Result<Question> {
    let category: Category = q
        .category
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question '{}': {e}", q.id))?;
    let difficulty: Difficulty = q
        .difficulty
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question '{}': {e}", q.id))?;

    let kind = match q.kind.as_str() {
        "multiple_choice" => QuestionKind::MultipleChoice {
            options: q.options,
            correct_option: q
                .correct_option
                .with_context(|| format!("question '{}': missing correct_option", q.id))?,
        },
        "true_false" => QuestionKind::TrueFalse {
            correct: q
                .correct
                .with_context(|| format!("question '{}': missing correct", q.id))?,
        },
        "code_completion" => QuestionKind::CodeCompletion {
            code_snippet: q
                .code_snippet
                .with_context(|| format!("question '{}': missing code_snippet", q.id))?,
            check: q
                .check
                .with_context(|| format!("question '{}': missing check", q.id))?
                .compile(&q.id)?,
            hints: q.hints,
        },
        "bug_fix" => QuestionKind::BugFix {
            buggy_code: q
                .buggy_code
                .with_context(|| format!("question '{}': missing buggy_code", q.id))?,
            check: q
                .check
                .with_context(|| format!("question '{}': missing check", q.id))?
                .compile(&q.id)?,
            hints: q.hints,
        },
        "short_answer" => QuestionKind::ShortAnswer {
            acceptable: q.acceptable,
            case_sensitive: q.case_sensitive,
        },
        "drag_drop" => QuestionKind::DragDrop {
            items: q.items,
            correct_order: q.correct_order,
        },
        "matching" => QuestionKind::Matching {
            terms: q.terms,
            definitions: q.definitions,
            pairs: q.pairs,
        },
        other => anyhow::bail!("question '{}': unknown question type '{other}'", q.id),
    };

    let mut question = Question::new(q.id, q.text, category, difficulty, q.points, kind)?;
    question.image_url = q.image_url;
    question.correct_feedback = q.correct_feedback;
    question.incorrect_feedback = q.incorrect_feedback;
    Ok(question)
}

/// Recursively load all `.toml` assessment files from a directory.
pub fn load_assessment_directory(dir: &Path) -> Result<Vec<AssessmentDefinition>> {
    let mut definitions = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            definitions.extend(load_assessment_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_assessment(&path) {
                Ok(definition) => definitions.push(definition),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(definitions)
}

/// A warning from assessment linting.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Lint an assessment definition for issues the hard invariants allow.
pub fn validate_assessment(definition: &AssessmentDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for question in &definition.questions {
        if question.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "question text is empty".into(),
            });
        }
    }

    // A category with a single question can never register as a weakness
    // (the scorer requires two answered questions), so its coverage is thin.
    let mut category_counts: HashMap<Category, usize> = HashMap::new();
    for question in &definition.questions {
        *category_counts.entry(question.category).or_default() += 1;
    }
    for (category, count) in category_counts {
        if count == 1 {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!(
                    "category {category} has a single question; it can never be flagged as a weakness"
                ),
            });
        }
    }

    if definition.passing_score == 0 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "passing score of 0 means every attempt passes".into(),
        });
    }

    if definition.time_limit_minutes >= 600 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "time limit of {} minutes applies no real time pressure",
                definition.time_limit_minutes
            ),
        });
    }

    warnings
}

// ---------------------------------------------------------------------------
// Answer sheets
// ---------------------------------------------------------------------------

/// Intermediate TOML structure for answer sheets. `Answer`'s own serde form
/// covers every TOML value shape, pair lists included.
#[derive(Debug, Deserialize)]
struct TomlAnswerSheet {
    #[serde(default)]
    answers: HashMap<String, Answer>,
}

/// Parse a TOML answer sheet mapping question id → submitted answer.
pub fn parse_answer_sheet(path: &Path) -> Result<HashMap<String, Answer>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;
    parse_answer_sheet_str(&content, path)
}

/// Parse an answer sheet from a TOML string.
pub fn parse_answer_sheet_str(
    content: &str,
    source_path: &Path,
) -> Result<HashMap<String, Answer>> {
    let parsed: TomlAnswerSheet = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    Ok(parsed.answers)
}
