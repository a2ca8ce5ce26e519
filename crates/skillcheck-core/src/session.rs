//! Assessment session state machine.
//!
//! One session is one user's attempt at an assessment. It owns the ordered
//! question list, the submitted answers, flagged-for-review markers, the
//! current position, and the countdown, and moves through
//! NotStarted → InProgress → Completed. Completed is terminal: the session
//! scores itself exactly once and freezes.
//!
//! Every mutating operation checks the lifecycle state first and fails with
//! `InvalidSessionState` without side effects when called out of phase.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::answer::Answer;
use crate::error::EngineError;
use crate::model::{AssessmentDefinition, Question};
use crate::report::ScoreReport;
use crate::scoring::score;
use crate::validator::is_correct;

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::NotStarted => write!(f, "not started"),
            SessionStatus::InProgress => write!(f, "in progress"),
            SessionStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One attempt at an assessment.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    id: Uuid,
    definition: AssessmentDefinition,
    answers: HashMap<String, Answer>,
    flagged: BTreeSet<String>,
    current: usize,
    time_remaining_secs: u64,
    status: SessionStatus,
    report: Option<ScoreReport>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl AssessmentSession {
    /// Create a NotStarted session for the given assessment.
    pub fn new(definition: AssessmentDefinition) -> Self {
        Self {
            id: Uuid::new_v4(),
            time_remaining_secs: definition.time_limit_secs(),
            definition,
            answers: HashMap::new(),
            flagged: BTreeSet::new(),
            current: 0,
            status: SessionStatus::NotStarted,
            report: None,
            started_at: None,
            completed_at: None,
        }
    }

    /// Begin the attempt: NotStarted → InProgress.
    ///
    /// Fails with `InvalidAssessment` for a zero-question assessment and
    /// `InvalidSessionState` if the session already started.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.status != SessionStatus::NotStarted {
            return Err(EngineError::InvalidSessionState {
                op: "start",
                status: self.status,
            });
        }
        if self.definition.questions.is_empty() {
            return Err(EngineError::InvalidAssessment);
        }
        self.status = SessionStatus::InProgress;
        self.time_remaining_secs = self.definition.time_limit_secs();
        self.current = 0;
        self.answers.clear();
        self.flagged.clear();
        self.started_at = Some(Utc::now());
        tracing::info!(
            session = %self.id,
            assessment = %self.definition.id,
            questions = self.definition.questions.len(),
            time_limit_secs = self.time_remaining_secs,
            "session started"
        );
        Ok(())
    }

    /// Store (or overwrite) the answer for a question.
    ///
    /// Does not advance the current position and does not evaluate
    /// correctness; scoring happens once, at completion. Immediate feedback
    /// goes through [`check_answer`](Self::check_answer) instead.
    pub fn submit_answer(
        &mut self,
        question_id: &str,
        answer: Answer,
    ) -> Result<(), EngineError> {
        self.ensure_in_progress("submit an answer")?;
        if self.definition.question(question_id).is_none() {
            return Err(EngineError::UnknownQuestion(question_id.to_string()));
        }
        self.answers.insert(question_id.to_string(), answer);
        Ok(())
    }

    /// Jump to a question by index. Out-of-range indices fail with
    /// `OutOfRange` and leave the position unchanged; callers are expected
    /// to bound-check rather than rely on clamping.
    pub fn go_to(&mut self, index: usize) -> Result<(), EngineError> {
        self.ensure_in_progress("navigate")?;
        let len = self.definition.questions.len();
        if index >= len {
            return Err(EngineError::OutOfRange { index, len });
        }
        self.current = index;
        Ok(())
    }

    /// Advance to the next question.
    pub fn next(&mut self) -> Result<(), EngineError> {
        let target = self.current + 1;
        self.go_to(target)
    }

    /// Return to the previous question. Fails with `AtFirstQuestion` on
    /// index 0; there is no index below it to report as out of range.
    pub fn previous(&mut self) -> Result<(), EngineError> {
        self.ensure_in_progress("navigate")?;
        let Some(target) = self.current.checked_sub(1) else {
            return Err(EngineError::AtFirstQuestion);
        };
        self.current = target;
        Ok(())
    }

    /// Toggle the review flag on a question.
    pub fn toggle_flag(&mut self, question_id: &str) -> Result<(), EngineError> {
        self.ensure_in_progress("toggle a flag")?;
        if self.definition.question(question_id).is_none() {
            return Err(EngineError::UnknownQuestion(question_id.to_string()));
        }
        if !self.flagged.remove(question_id) {
            self.flagged.insert(question_id.to_string());
        }
        Ok(())
    }

    /// One second of countdown. Reaching zero forces completion exactly as
    /// if [`submit`](Self::submit) had been called.
    pub fn tick(&mut self) -> Result<(), EngineError> {
        self.ensure_in_progress("tick the timer")?;
        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        if self.time_remaining_secs == 0 {
            tracing::info!(session = %self.id, "time expired, auto-submitting");
            self.complete()?;
        }
        Ok(())
    }

    /// Finish the attempt: InProgress → Completed. Scores exactly once and
    /// freezes answers, flags, and position.
    ///
    /// Idempotent on Completed sessions: the stored report is returned
    /// without re-scoring.
    pub fn submit(&mut self) -> Result<&ScoreReport, EngineError> {
        match self.status {
            SessionStatus::Completed => {
                // Freeze semantics: never re-score.
                match &self.report {
                    Some(report) => Ok(report),
                    // Unreachable by construction; complete() always stores.
                    None => Err(EngineError::InvalidSessionState {
                        op: "submit",
                        status: self.status,
                    }),
                }
            }
            SessionStatus::NotStarted => Err(EngineError::InvalidSessionState {
                op: "submit",
                status: self.status,
            }),
            SessionStatus::InProgress => {
                self.complete()?;
                match &self.report {
                    Some(report) => Ok(report),
                    None => Err(EngineError::InvalidSessionState {
                        op: "submit",
                        status: self.status,
                    }),
                }
            }
        }
    }

    fn complete(&mut self) -> Result<(), EngineError> {
        let report = score(
            &self.definition.questions,
            &self.answers,
            self.definition.passing_score,
        )?;
        tracing::info!(
            session = %self.id,
            total_score = report.total_score,
            passed = report.passed,
            "session completed"
        );
        self.report = Some(report);
        self.status = SessionStatus::Completed;
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    fn ensure_in_progress(&self, op: &'static str) -> Result<(), EngineError> {
        if self.status != SessionStatus::InProgress {
            return Err(EngineError::InvalidSessionState {
                op,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Evaluate an answer for immediate feedback without storing anything.
    pub fn check_answer(&self, question_id: &str, answer: &Answer) -> Result<bool, EngineError> {
        let question = self
            .definition
            .question(question_id)
            .ok_or_else(|| EngineError::UnknownQuestion(question_id.to_string()))?;
        is_correct(question, answer)
    }

    // -- read-only accessors ------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn definition(&self) -> &AssessmentDefinition {
        &self.definition
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.definition.questions.get(self.current)
    }

    pub fn question_count(&self) -> usize {
        self.definition.questions.len()
    }

    pub fn answer(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn answers(&self) -> &HashMap<String, Answer> {
        &self.answers
    }

    pub fn is_flagged(&self, question_id: &str) -> bool {
        self.flagged.contains(question_id)
    }

    pub fn flagged(&self) -> &BTreeSet<String> {
        &self.flagged
    }

    /// Fraction of questions answered so far, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let total = self.definition.questions.len();
        if total == 0 {
            0.0
        } else {
            self.answers.len() as f64 / total as f64
        }
    }

    pub fn time_remaining_secs(&self) -> u64 {
        self.time_remaining_secs
    }

    /// The score report, present once the session is Completed.
    pub fn report(&self) -> Option<&ScoreReport> {
        self.report.as_ref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Difficulty};

    fn definition(n: usize) -> AssessmentDefinition {
        let questions = (0..n)
            .map(|i| {
                Question::true_false(
                    format!("q{i}"),
                    "prompt",
                    Category::JavaScript,
                    Difficulty::Beginner,
                    5,
                    true,
                )
                .unwrap()
            })
            .collect();
        AssessmentDefinition::new("a1", "Basics", "", 30, 70, questions).unwrap()
    }

    fn started(n: usize) -> AssessmentSession {
        let mut session = AssessmentSession::new(definition(n));
        session.start().unwrap();
        session
    }

    #[test]
    fn lifecycle_happy_path() {
        let mut session = AssessmentSession::new(definition(2));
        assert_eq!(session.status(), SessionStatus::NotStarted);

        session.start().unwrap();
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.time_remaining_secs(), 30 * 60);
        assert_eq!(session.current_index(), 0);

        session.submit_answer("q0", Answer::Bool(true)).unwrap();
        session.submit_answer("q1", Answer::Bool(false)).unwrap();
        let report = session.submit().unwrap().clone();
        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(report.total_score, 50);
        assert_eq!(report.correct_count, 1);
    }

    #[test]
    fn start_twice_fails() {
        let mut session = started(1);
        let err = session.start().unwrap_err();
        assert!(matches!(err, EngineError::InvalidSessionState { .. }));
    }

    #[test]
    fn zero_questions_cannot_start() {
        let mut session = AssessmentSession::new(definition(0));
        assert_eq!(session.start().unwrap_err(), EngineError::InvalidAssessment);
        assert_eq!(session.status(), SessionStatus::NotStarted);
    }

    #[test]
    fn submit_answer_outside_in_progress_leaves_answers_unchanged() {
        let mut session = AssessmentSession::new(definition(2));
        let err = session.submit_answer("q0", Answer::Bool(true)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSessionState { .. }));
        assert!(session.answers().is_empty());

        let mut session = started(2);
        session.submit_answer("q0", Answer::Bool(true)).unwrap();
        session.submit().unwrap();
        let err = session.submit_answer("q1", Answer::Bool(true)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSessionState { .. }));
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn resubmission_overwrites_before_completion() {
        let mut session = started(1);
        session.submit_answer("q0", Answer::Bool(false)).unwrap();
        session.submit_answer("q0", Answer::Bool(true)).unwrap();
        let report = session.submit().unwrap();
        assert_eq!(report.total_score, 100);
    }

    #[test]
    fn unknown_question_rejected() {
        let mut session = started(1);
        assert_eq!(
            session.submit_answer("nope", Answer::Bool(true)).unwrap_err(),
            EngineError::UnknownQuestion("nope".into())
        );
        assert_eq!(
            session.toggle_flag("nope").unwrap_err(),
            EngineError::UnknownQuestion("nope".into())
        );
    }

    #[test]
    fn navigation_bounds() {
        let mut session = started(3);
        session.next().unwrap();
        session.next().unwrap();
        assert_eq!(session.current_index(), 2);

        // No clamping: out of range fails and position stays put.
        let err = session.next().unwrap_err();
        assert_eq!(err, EngineError::OutOfRange { index: 3, len: 3 });
        assert_eq!(session.current_index(), 2);

        session.go_to(0).unwrap();
        let err = session.previous().unwrap_err();
        assert_eq!(err, EngineError::AtFirstQuestion);
        // No sentinel index in the message, and position stays put.
        assert_eq!(err.to_string(), "already at the first question");
        assert_eq!(session.current_index(), 0);

        let err = session.go_to(7).unwrap_err();
        assert_eq!(err, EngineError::OutOfRange { index: 7, len: 3 });
    }

    #[test]
    fn flag_toggle_is_idempotent_toggle() {
        let mut session = started(2);
        session.toggle_flag("q1").unwrap();
        assert!(session.is_flagged("q1"));
        session.toggle_flag("q1").unwrap();
        assert!(!session.is_flagged("q1"));
    }

    #[test]
    fn flags_independent_of_answers() {
        let mut session = started(2);
        session.toggle_flag("q0").unwrap();
        assert!(session.is_flagged("q0"));
        assert!(session.answer("q0").is_none());
    }

    #[test]
    fn tick_counts_down_and_forces_completion() {
        let questions = vec![Question::true_false(
            "q0",
            "prompt",
            Category::Html,
            Difficulty::Beginner,
            5,
            true,
        )
        .unwrap()];
        let definition =
            AssessmentDefinition::new("a1", "Timed", "", 30, 70, questions).unwrap();
        let mut session = AssessmentSession::new(definition);
        session.start().unwrap();
        assert_eq!(session.time_remaining_secs(), 1800);

        session.submit_answer("q0", Answer::Bool(true)).unwrap();
        for _ in 0..1800 {
            session.tick().unwrap();
        }
        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(session.time_remaining_secs(), 0);
        let report = session.report().unwrap();
        assert_eq!(report.total_score, 100);

        // A tick against the completed session is a state error.
        assert!(matches!(
            session.tick().unwrap_err(),
            EngineError::InvalidSessionState { .. }
        ));
    }

    #[test]
    fn expiry_report_equals_manual_submit() {
        let mut by_timer = started(2);
        by_timer.submit_answer("q0", Answer::Bool(true)).unwrap();
        for _ in 0..(30 * 60) {
            by_timer.tick().unwrap();
        }

        let mut by_hand = started(2);
        by_hand.submit_answer("q0", Answer::Bool(true)).unwrap();
        let manual = by_hand.submit().unwrap().clone();

        assert_eq!(by_timer.report().unwrap(), &manual);
    }

    #[test]
    fn submit_is_idempotent() {
        let mut session = started(1);
        session.submit_answer("q0", Answer::Bool(true)).unwrap();
        let first = session.submit().unwrap().clone();
        let second = session.submit().unwrap().clone();
        assert_eq!(first, second);
        assert!(session.completed_at().is_some());
    }

    #[test]
    fn submit_before_start_fails() {
        let mut session = AssessmentSession::new(definition(1));
        assert!(matches!(
            session.submit().unwrap_err(),
            EngineError::InvalidSessionState { .. }
        ));
        assert!(session.report().is_none());
    }

    #[test]
    fn check_answer_gives_feedback_without_mutation() {
        let session = started(1);
        assert!(session.check_answer("q0", &Answer::Bool(true)).unwrap());
        assert!(!session.check_answer("q0", &Answer::Bool(false)).unwrap());
        assert!(session.answer("q0").is_none());
        assert!(matches!(
            session.check_answer("q9", &Answer::Bool(true)).unwrap_err(),
            EngineError::UnknownQuestion(_)
        ));
    }

    #[test]
    fn progress_fraction() {
        let mut session = started(4);
        assert_eq!(session.progress(), 0.0);
        session.submit_answer("q0", Answer::Bool(true)).unwrap();
        session.submit_answer("q1", Answer::Bool(true)).unwrap();
        assert!((session.progress() - 0.5).abs() < f64::EPSILON);
    }
}
