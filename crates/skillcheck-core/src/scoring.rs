//! Scoring: aggregate per-question correctness into a `ScoreReport`.
//!
//! Weight policy: equal weight per question. Every question contributes 1/N
//! to the overall percentage regardless of its `points` field, which is kept
//! for display only. Unanswered questions count toward the denominator of
//! the overall score but are excluded from per-category ratios.

use std::collections::{BTreeMap, HashMap};

use crate::answer::Answer;
use crate::error::EngineError;
use crate::model::{Category, Question};
use crate::report::{CategoryStats, ScoreReport};
use crate::validator::is_correct;

/// A category is a strength when at least this fraction of its answered
/// questions were correct.
const STRENGTH_THRESHOLD: f64 = 0.8;

/// A category is a weakness when under this fraction were correct...
const WEAKNESS_THRESHOLD: f64 = 0.6;

/// ...over at least this many answered questions. A single unlucky question
/// never flags a weakness.
const WEAKNESS_MIN_ANSWERED: usize = 2;

/// Score a set of questions against submitted answers.
///
/// Pure and deterministic: identical inputs produce an identical report.
/// Fails with `InvalidAssessment` for zero questions, and propagates
/// `TypeMismatch` if a stored answer has the wrong shape for its question.
pub fn score(
    questions: &[Question],
    answers: &HashMap<String, Answer>,
    passing_score: u32,
) -> Result<ScoreReport, EngineError> {
    if questions.is_empty() {
        return Err(EngineError::InvalidAssessment);
    }

    let mut correct_count = 0usize;
    let mut total_answered = 0usize;
    let mut per_category: BTreeMap<Category, CategoryStats> = BTreeMap::new();

    for question in questions {
        let Some(answer) = answers.get(&question.id) else {
            continue;
        };
        total_answered += 1;

        let entry = per_category
            .entry(question.category)
            .or_insert(CategoryStats {
                correct: 0,
                total: 0,
            });
        entry.total += 1;

        if is_correct(question, answer)? {
            correct_count += 1;
            entry.correct += 1;
        }
    }

    let total_questions = questions.len();
    let total_score =
        ((correct_count as f64 / total_questions as f64) * 100.0).round() as u32;
    let passed = total_score >= passing_score;

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    for (&category, stats) in &per_category {
        if stats.ratio() >= STRENGTH_THRESHOLD {
            strengths.push(category);
        } else if stats.ratio() < WEAKNESS_THRESHOLD && stats.total >= WEAKNESS_MIN_ANSWERED {
            weaknesses.push(category);
        }
    }

    tracing::debug!(
        total_score,
        correct_count,
        total_answered,
        total_questions,
        passed,
        "scored assessment"
    );

    Ok(ScoreReport {
        total_score,
        correct_count,
        total_answered,
        total_questions,
        passing_score,
        passed,
        strengths,
        weaknesses,
        per_category,
    })
}
