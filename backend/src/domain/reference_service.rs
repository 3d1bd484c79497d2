//! Rank and rule listings for signed-in members.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ReferenceData, ReferenceRepository, ReferenceRepositoryError};
use crate::domain::{Action, Caller, Error, Rank, Rule, authorize};

fn map_reference_error(error: ReferenceRepositoryError) -> Error {
    Error::internal(format!("reference data error: {error}"))
}

/// Reference data service implementing [`ReferenceData`].
#[derive(Clone)]
pub struct ReferenceDataService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> ReferenceDataService<R> {
    /// Create a new service over the reference repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> ReferenceData for ReferenceDataService<R>
where
    R: ReferenceRepository + ?Sized,
{
    async fn ranks(&self, caller: &Caller) -> Result<Vec<Rank>, Error> {
        authorize(caller, Action::ListRanks)?;
        self.repo.ranks().await.map_err(map_reference_error)
    }

    async fn rules(&self, caller: &Caller) -> Result<Vec<Rule>, Error> {
        authorize(caller, Action::ListRules)?;
        self.repo.rules().await.map_err(map_reference_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockReferenceRepository;
    use crate::domain::{ErrorCode, Role, UserId};

    #[tokio::test]
    async fn anonymous_callers_must_sign_in() {
        let mut repo = MockReferenceRepository::new();
        repo.expect_ranks().never();
        let err = ReferenceDataService::new(Arc::new(repo))
            .ranks(&Caller::Anonymous)
            .await
            .expect_err("login required");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn any_member_reads_rules() {
        let mut repo = MockReferenceRepository::new();
        repo.expect_rules().times(1).return_once(|| {
            Ok(vec![Rule {
                id: 1,
                content: "salute".to_owned(),
                category: "general".to_owned(),
            }])
        });
        let rules = ReferenceDataService::new(Arc::new(repo))
            .rules(&Caller::member(UserId::from_stored(3), Role::Citizen))
            .await
            .expect("rules");
        assert_eq!(rules.len(), 1);
    }

    #[tokio::test]
    async fn storage_failures_are_internal() {
        let mut repo = MockReferenceRepository::new();
        repo.expect_ranks()
            .return_once(|| Err(ReferenceRepositoryError::connection("refused")));
        let err = ReferenceDataService::new(Arc::new(repo))
            .ranks(&Caller::member(UserId::from_stored(3), Role::Police))
            .await
            .expect_err("storage down");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
