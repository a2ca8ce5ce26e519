//! Per-variant answer correctness rules.
//!
//! `is_correct` is pure: given a question and a submitted answer it decides
//! correctness and nothing else. Answers of the wrong shape for the
//! question's variant are a caller bug and fail with `TypeMismatch` rather
//! than being coerced.

use crate::answer::Answer;
use crate::error::EngineError;
use crate::model::{Question, QuestionKind};

/// Decide whether `answer` is a correct response to `question`.
pub fn is_correct(question: &Question, answer: &Answer) -> Result<bool, EngineError> {
    match (&question.kind, answer) {
        (
            QuestionKind::MultipleChoice { correct_option, .. },
            Answer::Choice(selected),
        ) => Ok(selected == correct_option),

        (QuestionKind::TrueFalse { correct }, Answer::Bool(submitted)) => {
            Ok(submitted == correct)
        }

        (
            QuestionKind::ShortAnswer {
                acceptable,
                case_sensitive,
            },
            Answer::Text(submitted),
        ) => {
            let submitted = normalize(submitted, *case_sensitive);
            Ok(acceptable
                .iter()
                .any(|accepted| normalize(accepted, *case_sensitive) == submitted))
        }

        // Ordering matters; no partial credit.
        (QuestionKind::DragDrop { correct_order, .. }, Answer::Order(submitted)) => {
            Ok(submitted == correct_order)
        }

        // All-or-nothing: the mapping must cover every term and every entry
        // must match. Incomplete or superfluous mappings are merely wrong.
        (QuestionKind::Matching { terms, pairs, .. }, Answer::Pairs(submitted)) => {
            Ok(submitted.len() == terms.len()
                && pairs
                    .iter()
                    .all(|(term, def)| submitted.get(term) == Some(def)))
        }

        (QuestionKind::CodeCompletion { check, .. }, Answer::Text(submitted))
        | (QuestionKind::BugFix { check, .. }, Answer::Text(submitted)) => {
            Ok(check.accepts(submitted))
        }

        (kind, answer) => Err(EngineError::TypeMismatch {
            question_id: question.id.clone(),
            expected: expected_shape(kind),
            got: answer.shape(),
        }),
    }
}

/// The answer shape a question variant expects, for error messages.
pub fn expected_shape(kind: &QuestionKind) -> &'static str {
    match kind {
        QuestionKind::MultipleChoice { .. } => "choice index",
        QuestionKind::TrueFalse { .. } => "bool",
        QuestionKind::CodeCompletion { .. }
        | QuestionKind::BugFix { .. }
        | QuestionKind::ShortAnswer { .. } => "text",
        QuestionKind::DragDrop { .. } => "ordering",
        QuestionKind::Matching { .. } => "pair mapping",
    }
}

fn normalize(text: &str, case_sensitive: bool) -> String {
    let trimmed = text.trim();
    if case_sensitive {
        trimmed.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, CodeCheck, Difficulty};

    fn mc() -> Question {
        Question::multiple_choice(
            "mc1",
            "Which hook performs side effects?",
            Category::React,
            Difficulty::Beginner,
            5,
            vec![
                "useState".into(),
                "useEffect".into(),
                "useContext".into(),
                "useReducer".into(),
            ],
            1,
        )
        .unwrap()
    }

    #[test]
    fn multiple_choice_exact_index() {
        let q = mc();
        assert!(is_correct(&q, &Answer::Choice(1)).unwrap());
        for wrong in [0, 2, 3] {
            assert!(!is_correct(&q, &Answer::Choice(wrong)).unwrap());
        }
    }

    #[test]
    fn true_false_structural_equality() {
        let q = Question::true_false(
            "tf1",
            "=== checks value and type.",
            Category::JavaScript,
            Difficulty::Beginner,
            5,
            true,
        )
        .unwrap();
        assert!(is_correct(&q, &Answer::Bool(true)).unwrap());
        assert!(!is_correct(&q, &Answer::Bool(false)).unwrap());
    }

    #[test]
    fn short_answer_case_insensitive() {
        let q = Question::short_answer(
            "sa1",
            "Name the state hook",
            Category::React,
            Difficulty::Beginner,
            5,
            vec!["useState".into(), "usestate".into()],
            false,
        )
        .unwrap();
        assert!(is_correct(&q, &Answer::from("UseState")).unwrap());
        assert!(is_correct(&q, &Answer::from("  useState  ")).unwrap());
        assert!(!is_correct(&q, &Answer::from("use-state")).unwrap());
    }

    #[test]
    fn short_answer_case_sensitive() {
        let q = Question::short_answer(
            "sa2",
            "Name the state hook, exactly",
            Category::React,
            Difficulty::Intermediate,
            5,
            vec!["useState".into()],
            true,
        )
        .unwrap();
        assert!(is_correct(&q, &Answer::from("useState")).unwrap());
        assert!(!is_correct(&q, &Answer::from("usestate")).unwrap());
        // Whitespace is still trimmed even in case-sensitive mode.
        assert!(is_correct(&q, &Answer::from(" useState\n")).unwrap());
    }

    #[test]
    fn drag_drop_exact_order_only() {
        let q = Question::drag_drop(
            "dd1",
            "Order the lifecycle",
            Category::Html,
            Difficulty::Beginner,
            5,
            vec!["parse".into(), "style".into(), "layout".into()],
            vec![0, 1, 2],
        )
        .unwrap();
        assert!(is_correct(&q, &Answer::Order(vec![0, 1, 2])).unwrap());
        for wrong in [
            vec![0, 2, 1],
            vec![1, 0, 2],
            vec![1, 2, 0],
            vec![2, 0, 1],
            vec![2, 1, 0],
        ] {
            assert!(!is_correct(&q, &Answer::Order(wrong)).unwrap());
        }
        // Wrong length is wrong, not an error.
        assert!(!is_correct(&q, &Answer::Order(vec![0, 1])).unwrap());
    }

    #[test]
    fn matching_all_or_nothing() {
        let q = Question::matching(
            "m1",
            "Match keyword to behavior",
            Category::JavaScript,
            Difficulty::Intermediate,
            5,
            vec!["let".into(), "const".into(), "var".into()],
            vec!["block".into(), "constant".into(), "function".into()],
            vec![(0, 0), (1, 1), (2, 2)],
        )
        .unwrap();

        assert!(is_correct(&q, &Answer::pairs([(0, 0), (1, 1), (2, 2)])).unwrap());

        // Flipping exactly one pair breaks the whole answer.
        assert!(!is_correct(&q, &Answer::pairs([(0, 0), (1, 2), (2, 2)])).unwrap());

        // Incomplete mapping is incorrect as a whole, not an error.
        assert!(!is_correct(&q, &Answer::pairs([(0, 0), (1, 1)])).unwrap());

        // Superfluous entries are incorrect too.
        assert!(!is_correct(&q, &Answer::pairs([(0, 0), (1, 1), (2, 2), (3, 0)])).unwrap());
    }

    #[test]
    fn code_completion_delegates_to_check() {
        let q = Question::code_completion(
            "cc1",
            "Sum the array",
            Category::JavaScript,
            Difficulty::Intermediate,
            10,
            "function sumArray(numbers) {\n  // your code\n}",
            CodeCheck::any_pattern([r"\.reduce\s*\(", r"for\s*\("]).unwrap(),
            vec![],
        )
        .unwrap();
        assert!(is_correct(&q, &Answer::from("return numbers.reduce((a, b) => a + b, 0)")).unwrap());
        assert!(!is_correct(&q, &Answer::from("return 42")).unwrap());
    }

    #[test]
    fn bug_fix_delegates_to_check() {
        let q = Question::bug_fix(
            "bf1",
            "Fix the filter",
            Category::JavaScript,
            Difficulty::Intermediate,
            10,
            "numbers.filter(num => { num % 2 === 0; })",
            CodeCheck::any_keyword(["return num % 2 !== 0", "return num % 2 === 1"]),
            vec!["The callback never returns.".into()],
        )
        .unwrap();
        assert!(is_correct(&q, &Answer::from("numbers.filter(num => { return num % 2 !== 0; })"))
            .unwrap());
        assert!(!is_correct(&q, &Answer::from("numbers.filter(num => num)")).unwrap());
    }

    #[test]
    fn wrong_shape_is_type_mismatch() {
        let q = mc();
        let err = is_correct(&q, &Answer::from("useEffect")).unwrap_err();
        assert_eq!(
            err,
            EngineError::TypeMismatch {
                question_id: "mc1".into(),
                expected: "choice index",
                got: "text",
            }
        );
    }
}
