//! Core data model for assessments.
//!
//! These are the fundamental types the entire skillcheck system uses to
//! represent questions, their correct-answer data, and assessment
//! definitions. Questions are value objects: every factory validates its
//! invariants at construction time and nothing mutates them afterwards.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Topic categories questions are grouped under for strength/weakness
/// analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Category {
    Html,
    Css,
    JavaScript,
    React,
    TypeScript,
    Accessibility,
    Performance,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 7] = [
        Category::Html,
        Category::Css,
        Category::JavaScript,
        Category::React,
        Category::TypeScript,
        Category::Accessibility,
        Category::Performance,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Html => write!(f, "HTML"),
            Category::Css => write!(f, "CSS"),
            Category::JavaScript => write!(f, "JavaScript"),
            Category::React => write!(f, "React"),
            Category::TypeScript => write!(f, "TypeScript"),
            Category::Accessibility => write!(f, "Accessibility"),
            Category::Performance => write!(f, "Performance"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Category::Html),
            "css" => Ok(Category::Css),
            "javascript" | "js" => Ok(Category::JavaScript),
            "react" => Ok(Category::React),
            "typescript" | "ts" => Ok(Category::TypeScript),
            "accessibility" | "a11y" => Ok(Category::Accessibility),
            "performance" => Ok(Category::Performance),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Question difficulty tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Correctness predicate for free-text code answers.
///
/// Free-form code cannot be compared structurally, so code-completion and
/// bug-fix questions carry a predicate supplied at authoring time. The
/// built-in modes are declarative (parseable from TOML) and knowingly
/// heuristic; `CodeCheck::custom` accepts an arbitrary function so authors
/// can later plug in a real interpreter or sandbox without touching the
/// engine contract.
#[derive(Clone)]
pub enum CodeCheck {
    /// Accept if any pattern matches the submission.
    AnyPattern(Vec<Regex>),
    /// Accept if at least `min_matches` of the terms appear in the
    /// submission (case-insensitive substring match).
    Keywords {
        terms: Vec<String>,
        min_matches: usize,
    },
    /// Accept if any single keyword appears in the submission.
    AnyKeyword(Vec<String>),
    /// An injected predicate over the raw submitted text.
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl CodeCheck {
    /// Build an any-of pattern check, compiling each regex.
    pub fn any_pattern<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compiled = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CodeCheck::AnyPattern(compiled))
    }

    /// Build a keyword-threshold check.
    pub fn keywords<I, S>(terms: I, min_matches: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CodeCheck::Keywords {
            terms: terms.into_iter().map(Into::into).collect(),
            min_matches,
        }
    }

    /// Build an any-single-keyword check.
    pub fn any_keyword<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CodeCheck::AnyKeyword(keywords.into_iter().map(Into::into).collect())
    }

    /// Wrap an arbitrary predicate.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        CodeCheck::Custom(Arc::new(f))
    }

    /// Run the predicate against a raw submission.
    pub fn accepts(&self, submission: &str) -> bool {
        match self {
            CodeCheck::AnyPattern(patterns) => patterns.iter().any(|p| p.is_match(submission)),
            CodeCheck::Keywords { terms, min_matches } => {
                let folded = submission.to_lowercase();
                let hits = terms
                    .iter()
                    .filter(|t| folded.contains(&t.to_lowercase()))
                    .count();
                hits >= *min_matches
            }
            CodeCheck::AnyKeyword(keywords) => {
                keywords.iter().any(|k| submission.contains(k.as_str()))
            }
            CodeCheck::Custom(f) => f(submission),
        }
    }
}

impl fmt::Debug for CodeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeCheck::AnyPattern(patterns) => f
                .debug_tuple("AnyPattern")
                .field(&patterns.iter().map(|p| p.as_str()).collect::<Vec<_>>())
                .finish(),
            CodeCheck::Keywords { terms, min_matches } => f
                .debug_struct("Keywords")
                .field("terms", terms)
                .field("min_matches", min_matches)
                .finish(),
            CodeCheck::AnyKeyword(keywords) => {
                f.debug_tuple("AnyKeyword").field(keywords).finish()
            }
            CodeCheck::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Variant-specific question data, discriminated by kind.
#[derive(Debug, Clone)]
pub enum QuestionKind {
    MultipleChoice {
        /// Ordered option texts, at least two.
        options: Vec<String>,
        /// Index of the correct option.
        correct_option: usize,
    },
    TrueFalse {
        correct: bool,
    },
    CodeCompletion {
        /// Snippet shown to the user, with blanks to fill.
        code_snippet: String,
        check: CodeCheck,
        /// Ordered hints revealed one at a time.
        hints: Vec<String>,
    },
    BugFix {
        /// The broken code the user must repair.
        buggy_code: String,
        check: CodeCheck,
        /// Ordered hints revealed one at a time.
        hints: Vec<String>,
    },
    ShortAnswer {
        /// Accepted answer texts, at least one.
        acceptable: Vec<String>,
        case_sensitive: bool,
    },
    DragDrop {
        /// Items to arrange.
        items: Vec<String>,
        /// The correct arrangement, a permutation of `0..items.len()`.
        correct_order: Vec<usize>,
    },
    Matching {
        terms: Vec<String>,
        definitions: Vec<String>,
        /// `(term index, definition index)` pairs covering every term once.
        pairs: Vec<(usize, usize)>,
    },
}

impl QuestionKind {
    /// Stable name of the variant, matching the TOML `type` discriminant.
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple_choice",
            QuestionKind::TrueFalse { .. } => "true_false",
            QuestionKind::CodeCompletion { .. } => "code_completion",
            QuestionKind::BugFix { .. } => "bug_fix",
            QuestionKind::ShortAnswer { .. } => "short_answer",
            QuestionKind::DragDrop { .. } => "drag_drop",
            QuestionKind::Matching { .. } => "matching",
        }
    }
}

/// A single assessment question.
#[derive(Debug, Clone)]
pub struct Question {
    /// Unique identifier within the assessment.
    pub id: String,
    /// The prompt shown to the user.
    pub text: String,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Display weight. Scoring is equal-weight per question; see scoring.
    pub points: u32,
    /// Optional illustration.
    pub image_url: Option<String>,
    /// Feedback shown after a correct answer.
    pub correct_feedback: Option<String>,
    /// Feedback shown after an incorrect answer.
    pub incorrect_feedback: Option<String>,
    /// Variant-specific data.
    pub kind: QuestionKind,
}

impl Question {
    /// Construct a question, checking every variant invariant.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
        points: u32,
        kind: QuestionKind,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if points == 0 {
            return Err(ValidationError::NonPositivePoints { id });
        }
        validate_kind(&id, &kind)?;
        Ok(Self {
            id,
            text: text.into(),
            category,
            difficulty,
            points,
            image_url: None,
            correct_feedback: None,
            incorrect_feedback: None,
            kind,
        })
    }

    pub fn multiple_choice(
        id: impl Into<String>,
        text: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
        points: u32,
        options: Vec<String>,
        correct_option: usize,
    ) -> Result<Self, ValidationError> {
        Self::new(
            id,
            text,
            category,
            difficulty,
            points,
            QuestionKind::MultipleChoice {
                options,
                correct_option,
            },
        )
    }

    pub fn true_false(
        id: impl Into<String>,
        text: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
        points: u32,
        correct: bool,
    ) -> Result<Self, ValidationError> {
        Self::new(
            id,
            text,
            category,
            difficulty,
            points,
            QuestionKind::TrueFalse { correct },
        )
    }

    pub fn code_completion(
        id: impl Into<String>,
        text: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
        points: u32,
        code_snippet: impl Into<String>,
        check: CodeCheck,
        hints: Vec<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            id,
            text,
            category,
            difficulty,
            points,
            QuestionKind::CodeCompletion {
                code_snippet: code_snippet.into(),
                check,
                hints,
            },
        )
    }

    pub fn bug_fix(
        id: impl Into<String>,
        text: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
        points: u32,
        buggy_code: impl Into<String>,
        check: CodeCheck,
        hints: Vec<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            id,
            text,
            category,
            difficulty,
            points,
            QuestionKind::BugFix {
                buggy_code: buggy_code.into(),
                check,
                hints,
            },
        )
    }

    pub fn short_answer(
        id: impl Into<String>,
        text: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
        points: u32,
        acceptable: Vec<String>,
        case_sensitive: bool,
    ) -> Result<Self, ValidationError> {
        Self::new(
            id,
            text,
            category,
            difficulty,
            points,
            QuestionKind::ShortAnswer {
                acceptable,
                case_sensitive,
            },
        )
    }

    pub fn drag_drop(
        id: impl Into<String>,
        text: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
        points: u32,
        items: Vec<String>,
        correct_order: Vec<usize>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            id,
            text,
            category,
            difficulty,
            points,
            QuestionKind::DragDrop {
                items,
                correct_order,
            },
        )
    }

    pub fn matching(
        id: impl Into<String>,
        text: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
        points: u32,
        terms: Vec<String>,
        definitions: Vec<String>,
        pairs: Vec<(usize, usize)>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            id,
            text,
            category,
            difficulty,
            points,
            QuestionKind::Matching {
                terms,
                definitions,
                pairs,
            },
        )
    }

    /// Attach an illustration URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Attach post-answer feedback strings.
    pub fn with_feedback(
        mut self,
        correct: impl Into<String>,
        incorrect: impl Into<String>,
    ) -> Self {
        self.correct_feedback = Some(correct.into());
        self.incorrect_feedback = Some(incorrect.into());
        self
    }
}

fn validate_kind(id: &str, kind: &QuestionKind) -> Result<(), ValidationError> {
    match kind {
        QuestionKind::MultipleChoice {
            options,
            correct_option,
        } => {
            if options.len() < 2 {
                return Err(ValidationError::TooFewOptions {
                    id: id.to_string(),
                    count: options.len(),
                });
            }
            if *correct_option >= options.len() {
                return Err(ValidationError::IndexOutOfRange {
                    id: id.to_string(),
                    field: "correct_option",
                    index: *correct_option,
                    len: options.len(),
                });
            }
        }
        QuestionKind::TrueFalse { .. }
        | QuestionKind::CodeCompletion { .. }
        | QuestionKind::BugFix { .. } => {}
        QuestionKind::ShortAnswer { acceptable, .. } => {
            if acceptable.is_empty() {
                return Err(ValidationError::NoAcceptableAnswers { id: id.to_string() });
            }
        }
        QuestionKind::DragDrop {
            items,
            correct_order,
        } => {
            if correct_order.len() != items.len() || !is_permutation(correct_order) {
                return Err(ValidationError::NotAPermutation {
                    id: id.to_string(),
                    len: items.len(),
                });
            }
        }
        QuestionKind::Matching {
            terms,
            definitions,
            pairs,
        } => {
            for &(_, def) in pairs {
                if def >= definitions.len() {
                    return Err(ValidationError::IndexOutOfRange {
                        id: id.to_string(),
                        field: "pairs",
                        index: def,
                        len: definitions.len(),
                    });
                }
            }
            let mut seen = vec![false; terms.len()];
            for &(term, _) in pairs {
                if term >= terms.len() || seen[term] {
                    return Err(ValidationError::IncompletePairing { id: id.to_string() });
                }
                seen[term] = true;
            }
            if pairs.len() != terms.len() {
                return Err(ValidationError::IncompletePairing { id: id.to_string() });
            }
        }
    }
    Ok(())
}

/// Whether `order` contains each of `0..order.len()` exactly once.
fn is_permutation(order: &[usize]) -> bool {
    let mut seen = vec![false; order.len()];
    for &idx in order {
        if idx >= order.len() || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// A fixed ordered set of questions with a time limit and passing threshold.
#[derive(Debug, Clone)]
pub struct AssessmentDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Countdown budget for one attempt.
    pub time_limit_minutes: u64,
    /// Percentage threshold for a passing verdict.
    pub passing_score: u32,
    /// Ordered questions with unique ids.
    pub questions: Vec<Question>,
}

impl AssessmentDefinition {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        time_limit_minutes: u64,
        passing_score: u32,
        questions: Vec<Question>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if passing_score > 100 {
            return Err(ValidationError::PassingScoreOutOfRange {
                assessment: id,
                score: passing_score,
            });
        }
        if time_limit_minutes == 0 {
            return Err(ValidationError::ZeroTimeLimit { assessment: id });
        }
        let mut seen = std::collections::HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(ValidationError::DuplicateQuestionId {
                    assessment: id,
                    id: q.id.clone(),
                });
            }
        }
        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            time_limit_minutes,
            passing_score,
            questions,
        })
    }

    /// The time budget in seconds, as the session counts it.
    pub fn time_limit_secs(&self) -> u64 {
        self.time_limit_minutes * 60
    }

    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}
