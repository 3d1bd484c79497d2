//! Timed police entrance quiz.
//!
//! The quiz walks a fixed [`QuestionBank`], giving each question its own
//! countdown. [`QuizController`] is the synchronous state machine and
//! [`QuizRunner`] drives it on tokio, delivering the answers exactly once
//! through the `ApplicationSubmitter` port.

mod controller;
mod runner;

use std::collections::HashSet;
use std::time::Duration;

pub use controller::{QuizController, QuizError, QuizPhase, QuizSnapshot, TICK};
pub use runner::{QuizHandle, QuizInput, QuizRunner};

/// Category of a quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Radio protocol code the candidate must define.
    Protocol,
    /// Free-form procedural question.
    General,
}

/// A single question and the time allowed to answer it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub label: String,
    pub kind: QuestionKind,
    pub time_limit: Duration,
}

impl QuizQuestion {
    fn seeded(label: &str, kind: QuestionKind, seconds: u64) -> Self {
        Self {
            label: label.to_owned(),
            kind,
            time_limit: Duration::from_secs(seconds),
        }
    }
}

/// Validation errors for [`QuestionBank`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionBankError {
    #[error("question bank must contain at least one question")]
    Empty,
    #[error("question label `{label}` appears more than once")]
    DuplicateLabel { label: String },
    #[error("question `{label}` has no time to answer")]
    ZeroTimeLimit { label: String },
}

/// Ordered, validated list of quiz questions.
///
/// Labels double as answer keys, so they must be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank(Vec<QuizQuestion>);

impl QuestionBank {
    /// Validate a list of questions.
    ///
    /// # Errors
    /// Rejects empty banks, repeated labels and zero time limits.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }
        let mut seen = HashSet::new();
        for question in &questions {
            if question.time_limit.is_zero() {
                return Err(QuestionBankError::ZeroTimeLimit {
                    label: question.label.clone(),
                });
            }
            if !seen.insert(question.label.as_str()) {
                return Err(QuestionBankError::DuplicateLabel {
                    label: question.label.clone(),
                });
            }
        }
        Ok(Self(questions))
    }

    /// Questions in presentation order.
    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.0
    }

    /// Number of questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Question at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.0.get(index)
    }

    /// Every label in presentation order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|question| question.label.clone()).collect()
    }
}

const PROTOCOL_CODES: [&str; 12] = [
    "0-1", "0-2", "0-3", "0-4", "0-5", "0-6", "0-7", "0-8", "10-1", "10-3", "10-7", "10-6",
];
const PROTOCOL_SECONDS: u64 = 7;

/// The fifteen-question police entrance test.
#[must_use]
pub fn police_question_bank() -> QuestionBank {
    let mut questions: Vec<QuizQuestion> = PROTOCOL_CODES
        .iter()
        .map(|code| QuizQuestion::seeded(code, QuestionKind::Protocol, PROTOCOL_SECONDS))
        .collect();
    questions.extend([
        QuizQuestion::seeded("اذكر 4 من شروط الهروب امن", QuestionKind::General, 15),
        QuizQuestion::seeded("كم مدة بين كل بلاغ وبلاغ", QuestionKind::General, 5),
        QuizQuestion::seeded(
            "وش تصنيف بلاغات بنك وكم وحدة تتوجه لكل بلاغ",
            QuestionKind::General,
            25,
        ),
    ]);
    // Labels and limits above are fixed and satisfy the bank invariants.
    QuestionBank(questions)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[test]
    fn police_bank_passes_validation() {
        let bank = police_question_bank();
        let revalidated = QuestionBank::new(bank.questions().to_vec()).expect("valid bank");
        assert_eq!(revalidated.len(), 15);
        assert_eq!(
            bank.questions()
                .iter()
                .filter(|q| q.kind == QuestionKind::Protocol)
                .count(),
            12
        );
        assert_eq!(bank.labels().first().map(String::as_str), Some("0-1"));
    }

    #[rstest]
    #[case(Vec::new(), QuestionBankError::Empty)]
    #[case(
        vec![
            QuizQuestion::seeded("10-3", QuestionKind::Protocol, 7),
            QuizQuestion::seeded("10-3", QuestionKind::Protocol, 7),
        ],
        QuestionBankError::DuplicateLabel { label: "10-3".into() }
    )]
    #[case(
        vec![QuizQuestion::seeded("0-1", QuestionKind::Protocol, 0)],
        QuestionBankError::ZeroTimeLimit { label: "0-1".into() }
    )]
    fn rejects_invalid_banks(
        #[case] questions: Vec<QuizQuestion>,
        #[case] expected: QuestionBankError,
    ) {
        assert_eq!(QuestionBank::new(questions), Err(expected));
    }
}
