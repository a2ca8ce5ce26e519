//! Engine error types.
//!
//! Two taxonomies: `ValidationError` for malformed question definitions at
//! authoring time, and `EngineError` for runtime contract violations. Both
//! are programming-contract failures rather than expected user-facing
//! conditions; callers are expected to fail loudly instead of coercing input.

use thiserror::Error;

use crate::session::SessionStatus;

/// Errors raised while constructing questions or assessment definitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Every question must carry a positive point weight.
    #[error("question '{id}': points must be positive")]
    NonPositivePoints { id: String },

    /// Multiple-choice questions need at least two options.
    #[error("question '{id}': needs at least 2 options, got {count}")]
    TooFewOptions { id: String, count: usize },

    /// An index refers outside its own option array.
    #[error("question '{id}': {field} index {index} out of range for {len} entries")]
    IndexOutOfRange {
        id: String,
        field: &'static str,
        index: usize,
        len: usize,
    },

    /// A drag-drop ordering must be a permutation of `0..items.len()`.
    #[error("question '{id}': correct_order is not a permutation of 0..{len}")]
    NotAPermutation { id: String, len: usize },

    /// Matching pairs must cover every term exactly once.
    #[error("question '{id}': pairs do not map every term exactly once")]
    IncompletePairing { id: String },

    /// Short-answer questions need at least one acceptable answer.
    #[error("question '{id}': no acceptable answers given")]
    NoAcceptableAnswers { id: String },

    /// A regex pattern in a code check failed to compile.
    #[error("question '{id}': invalid pattern: {message}")]
    InvalidPattern { id: String, message: String },

    /// Question ids within an assessment must be unique.
    #[error("duplicate question id '{id}' in assessment '{assessment}'")]
    DuplicateQuestionId { assessment: String, id: String },

    /// Passing score is a percentage.
    #[error("assessment '{assessment}': passing score {score} exceeds 100")]
    PassingScoreOutOfRange { assessment: String, score: u32 },

    /// A timed assessment needs a nonzero limit.
    #[error("assessment '{assessment}': time limit must be positive")]
    ZeroTimeLimit { assessment: String },
}

/// Errors raised by the validator, scorer, and session at runtime.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// An answer of the wrong shape was routed to a question variant.
    #[error("answer shape mismatch for question '{question_id}': expected {expected}, got {got}")]
    TypeMismatch {
        question_id: String,
        expected: &'static str,
        got: &'static str,
    },

    /// A navigation index outside `[0, len)`. Deliberately not clamped.
    #[error("question index {index} out of range (assessment has {len} questions)")]
    OutOfRange { index: usize, len: usize },

    /// Navigating backwards while already on the first question.
    #[error("already at the first question")]
    AtFirstQuestion,

    /// A mutating call in the wrong lifecycle state.
    #[error("cannot {op} while session is {status}")]
    InvalidSessionState { op: &'static str, status: SessionStatus },

    /// Scoring or starting an assessment with no questions.
    #[error("assessment has no questions")]
    InvalidAssessment,

    /// An answer or flag referenced a question id the assessment does not contain.
    #[error("unknown question id '{0}'")]
    UnknownQuestion(String),
}

impl EngineError {
    /// Returns `true` if this error indicates a caller bug (wrong shape,
    /// bad index, wrong lifecycle state) as opposed to a bad assessment.
    pub fn is_caller_bug(&self) -> bool {
        !matches!(self, EngineError::InvalidAssessment)
    }
}
