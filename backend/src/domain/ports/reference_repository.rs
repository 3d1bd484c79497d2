//! Port for rank and rule reference data.

use async_trait::async_trait;

use crate::domain::{NewRank, NewRule, Rank, Rule};

use super::define_port_error;

define_port_error! {
    /// Errors raised by reference data storage.
    pub enum ReferenceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "reference repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "reference repository query failed: {message}",
    }
}

/// Rank and rule storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// Ranks ordered by their `order` column.
    async fn ranks(&self) -> Result<Vec<Rank>, ReferenceRepositoryError>;

    /// Rules ordered by id.
    async fn rules(&self) -> Result<Vec<Rule>, ReferenceRepositoryError>;

    /// Append ranks.
    async fn insert_ranks(&self, ranks: &[NewRank]) -> Result<(), ReferenceRepositoryError>;

    /// Append rules.
    async fn insert_rules(&self, rules: &[NewRule]) -> Result<(), ReferenceRepositoryError>;
}
