//! Port through which the quiz runner delivers its single submission.

use async_trait::async_trait;

use crate::domain::PoliceAnswers;

use super::define_port_error;

define_port_error! {
    /// Errors raised when delivering a quiz submission.
    pub enum ApplicationSubmitterError {
        /// The portal refused the submission (closed gate, duplicate, ...).
        Rejected { message: String } => "submission rejected: {message}",
        /// The portal could not be reached.
        Transport { message: String } => "submission transport failed: {message}",
    }
}

/// Delivers completed police quiz answers as an application.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationSubmitter: Send + Sync {
    /// Submit the answers once.
    async fn submit(&self, answers: &PoliceAnswers) -> Result<(), ApplicationSubmitterError>;
}
