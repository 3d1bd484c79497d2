//! Driving port for rank and rule listings.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Rank, Rule};

/// Reference data use-cases called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceData: Send + Sync {
    /// Ranks ordered by seniority.
    async fn ranks(&self, caller: &Caller) -> Result<Vec<Rank>, Error>;

    /// Rules in insertion order.
    async fn rules(&self, caller: &Caller) -> Result<Vec<Rule>, Error>;
}
