//! Tokio driver for [`QuizController`].
//!
//! The loop owns a single countdown `Interval` that lives only while the
//! quiz is in the testing phase and is reset whenever the question changes.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::domain::PoliceAnswers;
use crate::domain::ports::ApplicationSubmitter;

use super::controller::{QuizController, QuizError, QuizPhase, QuizSnapshot, TICK};
use super::QuestionBank;

const INPUT_BUFFER: usize = 16;

/// Candidate input forwarded to the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizInput {
    /// Replace the answer buffer.
    Answer(String),
    /// Record the answer and move to the next question.
    Next,
    /// Leave the quiz without submitting.
    Abandon,
}

/// Client side of a running quiz.
#[derive(Debug)]
pub struct QuizHandle {
    pub inputs: mpsc::Sender<QuizInput>,
    pub snapshots: watch::Receiver<QuizSnapshot>,
}

/// Runs one quiz session to completion.
pub struct QuizRunner<S: ?Sized> {
    controller: QuizController,
    submitter: Arc<S>,
    inputs: mpsc::Receiver<QuizInput>,
    snapshots: watch::Sender<QuizSnapshot>,
}

impl<S> QuizRunner<S>
where
    S: ApplicationSubmitter + ?Sized,
{
    /// Build a runner and the handle used to feed it.
    pub fn new(bank: QuestionBank, submitter: Arc<S>) -> (Self, QuizHandle) {
        let controller = QuizController::new(bank);
        let (input_tx, input_rx) = mpsc::channel(INPUT_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
        let runner = Self {
            controller,
            submitter,
            inputs: input_rx,
            snapshots: snapshot_tx,
        };
        let handle = QuizHandle {
            inputs: input_tx,
            snapshots: snapshot_rx,
        };
        (runner, handle)
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.controller.snapshot());
    }

    /// Drive the quiz until it reaches a terminal phase.
    ///
    /// Dropping every input sender counts as abandoning the quiz.
    ///
    /// # Errors
    /// Returns [`QuizError`] only if the controller rejects a transition,
    /// which indicates a bug in the loop.
    pub async fn run(mut self) -> Result<QuizPhase, QuizError> {
        self.controller.start()?;
        self.publish();

        let submission = self.run_questions().await?;
        if let Some(answers) = submission {
            self.submit(&answers).await?;
        }
        self.publish();
        Ok(self.controller.phase().clone())
    }

    async fn run_questions(&mut self) -> Result<Option<PoliceAnswers>, QuizError> {
        let mut countdown = time::interval_at(Instant::now() + TICK, TICK);
        countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut shown = 0;

        loop {
            let QuizPhase::Testing { index, .. } = *self.controller.phase() else {
                return Ok(None);
            };
            if index != shown {
                countdown.reset();
                shown = index;
            }

            let submission = tokio::select! {
                _ = countdown.tick() => self.controller.tick()?,
                input = self.inputs.recv() => match input {
                    Some(QuizInput::Answer(text)) => {
                        self.controller.type_answer(text)?;
                        None
                    }
                    Some(QuizInput::Next) => self.controller.advance()?,
                    Some(QuizInput::Abandon) | None => {
                        self.controller.abandon()?;
                        info!("quiz abandoned");
                        None
                    }
                },
            };
            self.publish();
            if submission.is_some() {
                return Ok(submission);
            }
        }
    }

    async fn submit(&mut self, answers: &PoliceAnswers) -> Result<(), QuizError> {
        let outcome = self.submitter.submit(answers).await;
        match &outcome {
            Ok(()) => info!(questions = answers.answers.len(), "quiz submitted"),
            Err(error) => warn!(%error, "quiz submission failed"),
        }
        self.controller
            .settle(outcome.map_err(|error| error.to_string()))
    }
}
