//! Score report types with JSON persistence.
//!
//! A `ScoreReport` is derived exactly once per completed session and is
//! deliberately deterministic: it carries no ids or timestamps, so scoring
//! the same inputs twice produces field-for-field equal reports. Session
//! metadata (attempt id, started/completed times) lives on the session.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Category;

/// Per-category answered/correct tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Correctly answered questions in this category.
    pub correct: usize,
    /// Answered questions in this category (unanswered are excluded).
    pub total: usize,
}

impl CategoryStats {
    /// Fraction correct among answered questions.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// The sole output the presentation layer consumes from a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Overall percentage, 0..=100. Unanswered questions count against it.
    pub total_score: u32,
    /// Questions answered correctly.
    pub correct_count: usize,
    /// Questions that received any answer.
    pub total_answered: usize,
    /// All questions in the assessment.
    pub total_questions: usize,
    /// The threshold the verdict was computed against.
    pub passing_score: u32,
    /// `total_score >= passing_score`.
    pub passed: bool,
    /// Categories with >= 80% correct among answered questions. Sorted.
    pub strengths: Vec<Category>,
    /// Categories with < 60% correct over at least two answered questions. Sorted.
    pub weaknesses: Vec<Category>,
    /// Tallies for every category that had at least one answered question.
    pub per_category: BTreeMap<Category, CategoryStats>,
}

/// Minimum score for certificate issuance, independent of the assessment's
/// own passing threshold.
pub const CERTIFICATE_MIN_SCORE: u32 = 70;

impl ScoreReport {
    /// Whether this result qualifies for a certificate: a passing verdict
    /// and a score of at least [`CERTIFICATE_MIN_SCORE`].
    pub fn certificate_eligible(&self) -> bool {
        self.passed && self.total_score >= CERTIFICATE_MIN_SCORE
    }

    /// Save the report as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ScoreReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
