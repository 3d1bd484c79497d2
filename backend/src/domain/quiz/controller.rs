//! Synchronous quiz state machine.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::domain::PoliceAnswers;

use super::{QuestionBank, QuizQuestion};

/// Countdown granularity.
pub const TICK: Duration = Duration::from_secs(1);

/// Where the candidate is in the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    Intro,
    Testing { index: usize, remaining: Duration },
    Submitting,
    Succeeded,
    SubmissionFailed { message: String },
    Abandoned,
}

impl QuizPhase {
    const fn name(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Testing { .. } => "testing",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::SubmissionFailed { .. } => "submission_failed",
            Self::Abandoned => "abandoned",
        }
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::SubmissionFailed { .. } | Self::Abandoned
        )
    }
}

/// Operation attempted in a phase that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {operation} while {phase}")]
pub struct QuizError {
    pub operation: &'static str,
    pub phase: &'static str,
}

/// Read-only view published to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    pub question: Option<QuizQuestion>,
    pub answer: String,
    pub total: usize,
}

/// Drives one candidate through a [`QuestionBank`].
#[derive(Debug, Clone)]
pub struct QuizController {
    bank: QuestionBank,
    phase: QuizPhase,
    buffer: String,
    answers: BTreeMap<String, String>,
}

impl QuizController {
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            phase: QuizPhase::Intro,
            buffer: String::new(),
            answers: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    /// Current answer buffer.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        let question = match self.phase {
            QuizPhase::Testing { index, .. } => self.bank.get(index).cloned(),
            _ => None,
        };
        QuizSnapshot {
            phase: self.phase.clone(),
            question,
            answer: self.buffer.clone(),
            total: self.bank.len(),
        }
    }

    fn reject(&self, operation: &'static str) -> QuizError {
        QuizError {
            operation,
            phase: self.phase.name(),
        }
    }

    fn testing_at(&self, index: usize) -> Option<QuizPhase> {
        self.bank.get(index).map(|question| QuizPhase::Testing {
            index,
            remaining: question.time_limit,
        })
    }

    /// Begin the first question.
    ///
    /// # Errors
    /// Only valid from [`QuizPhase::Intro`].
    pub fn start(&mut self) -> Result<(), QuizError> {
        if self.phase != QuizPhase::Intro {
            return Err(self.reject("start"));
        }
        self.phase = self.testing_at(0).ok_or_else(|| self.reject("start"))?;
        Ok(())
    }

    /// Replace the answer buffer for the current question.
    ///
    /// # Errors
    /// Only valid while testing.
    pub fn type_answer(&mut self, text: impl Into<String>) -> Result<(), QuizError> {
        if !matches!(self.phase, QuizPhase::Testing { .. }) {
            return Err(self.reject("type an answer"));
        }
        self.buffer = text.into();
        Ok(())
    }

    /// Count one [`TICK`] down; running out behaves exactly like
    /// [`advance`](Self::advance).
    ///
    /// # Errors
    /// Only valid while testing.
    pub fn tick(&mut self) -> Result<Option<PoliceAnswers>, QuizError> {
        let QuizPhase::Testing { index, remaining } = self.phase else {
            return Err(self.reject("tick"));
        };
        let remaining = remaining.saturating_sub(TICK);
        if remaining.is_zero() {
            return self.advance();
        }
        self.phase = QuizPhase::Testing { index, remaining };
        Ok(None)
    }

    /// Record the buffer against the current question and move on.
    ///
    /// Returns the submission once the last question is recorded.
    ///
    /// # Errors
    /// Only valid while testing.
    pub fn advance(&mut self) -> Result<Option<PoliceAnswers>, QuizError> {
        let QuizPhase::Testing { index, .. } = self.phase else {
            return Err(self.reject("advance"));
        };
        let label = self
            .bank
            .get(index)
            .map(|question| question.label.clone())
            .ok_or_else(|| self.reject("advance"))?;
        self.answers.insert(label, std::mem::take(&mut self.buffer));

        if let Some(next) = self.testing_at(index + 1) {
            self.phase = next;
            return Ok(None);
        }
        self.phase = QuizPhase::Submitting;
        Ok(Some(PoliceAnswers {
            protocols: self.bank.labels(),
            answers: self.answers.clone(),
        }))
    }

    /// Record the submission outcome. There is no retry.
    ///
    /// # Errors
    /// Only valid while submitting.
    pub fn settle(&mut self, result: Result<(), String>) -> Result<(), QuizError> {
        if self.phase != QuizPhase::Submitting {
            return Err(self.reject("settle"));
        }
        self.phase = match result {
            Ok(()) => QuizPhase::Succeeded,
            Err(message) => QuizPhase::SubmissionFailed { message },
        };
        Ok(())
    }

    /// Drop all progress.
    ///
    /// # Errors
    /// Not allowed once a submission is in flight or the quiz has ended.
    pub fn abandon(&mut self) -> Result<(), QuizError> {
        if self.phase == QuizPhase::Submitting || self.phase.is_terminal() {
            return Err(self.reject("abandon"));
        }
        self.buffer.clear();
        self.answers.clear();
        self.phase = QuizPhase::Abandoned;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::quiz::{QuestionKind, police_question_bank};

    fn two_question_bank() -> QuestionBank {
        QuestionBank::new(vec![
            QuizQuestion {
                label: "10-3".into(),
                kind: QuestionKind::Protocol,
                time_limit: Duration::from_secs(2),
            },
            QuizQuestion {
                label: "status".into(),
                kind: QuestionKind::General,
                time_limit: Duration::from_secs(3),
            },
        ])
        .expect("valid bank")
    }

    #[test]
    fn start_shows_first_question_with_full_time() {
        let mut quiz = QuizController::new(police_question_bank());
        quiz.start().expect("start");
        assert_eq!(
            quiz.phase(),
            &QuizPhase::Testing {
                index: 0,
                remaining: Duration::from_secs(7)
            }
        );
        assert_eq!(
            quiz.snapshot().question.map(|q| q.label),
            Some("0-1".to_owned())
        );
    }

    #[test]
    fn expiry_records_typed_answer_and_resets_timer() {
        let mut quiz = QuizController::new(two_question_bank());
        quiz.start().expect("start");
        quiz.type_answer("officer needs help").expect("typing");
        assert_eq!(quiz.tick().expect("tick"), None);
        assert_eq!(quiz.tick().expect("tick"), None);
        assert_eq!(
            quiz.phase(),
            &QuizPhase::Testing {
                index: 1,
                remaining: Duration::from_secs(3)
            }
        );
        assert_eq!(quiz.answer(), "");
    }

    #[test]
    fn last_advance_yields_single_submission() {
        let mut quiz = QuizController::new(two_question_bank());
        quiz.start().expect("start");
        quiz.type_answer("first").expect("typing");
        quiz.type_answer("replaced").expect("typing");
        assert_eq!(quiz.advance().expect("advance"), None);

        let submission = quiz
            .advance()
            .expect("advance")
            .expect("submission after last question");
        assert_eq!(submission.protocols, vec!["10-3", "status"]);
        assert_eq!(submission.answers.get("10-3").map(String::as_str), Some("replaced"));
        assert_eq!(submission.answers.get("status").map(String::as_str), Some(""));
        assert_eq!(quiz.phase(), &QuizPhase::Submitting);
        assert!(quiz.advance().is_err());
    }

    #[test]
    fn settle_is_final() {
        let mut quiz = QuizController::new(two_question_bank());
        quiz.start().expect("start");
        quiz.advance().expect("advance");
        quiz.advance().expect("advance");
        quiz.settle(Err("Applications are currently closed".into()))
            .expect("settle");
        assert_eq!(
            quiz.phase(),
            &QuizPhase::SubmissionFailed {
                message: "Applications are currently closed".into()
            }
        );
        assert!(quiz.settle(Ok(())).is_err());
        assert!(quiz.abandon().is_err());
    }

    #[test]
    fn abandon_discards_progress() {
        let mut quiz = QuizController::new(two_question_bank());
        quiz.start().expect("start");
        quiz.type_answer("draft").expect("typing");
        quiz.advance().expect("advance");
        quiz.abandon().expect("abandon");
        assert_eq!(quiz.phase(), &QuizPhase::Abandoned);
        assert_eq!(quiz.answer(), "");
        assert!(quiz.type_answer("late").is_err());
    }

    #[test]
    fn typing_before_start_is_rejected() {
        let mut quiz = QuizController::new(two_question_bank());
        let err = quiz.type_answer("early").expect_err("not testing");
        assert_eq!(err.to_string(), "cannot type an answer while intro");
    }
}
