//! Builders wiring repositories into the HTTP state.
//!
//! PostgreSQL-backed repositories are used when a pool is configured;
//! otherwise every port shares one [`InMemoryStore`].

use std::sync::Arc;

use portal::domain::ports::{
    AnnouncementRepository, ApplicationRepository, PasswordHasher, ReferenceRepository,
    SettingsRepository, TaskRepository, UserRepository,
};
use portal::domain::{
    AccountService, AdminService, ApplicationService, BootstrapPorts, BootstrapReport, Error,
    NoticeBoardService, ReferenceDataService, SettingsService, bootstrap,
};
use portal::inbound::http::state::HttpState;
use portal::outbound::memory::InMemoryStore;
use portal::outbound::persistence::{
    DbPool, DieselAnnouncementRepository, DieselApplicationRepository,
    DieselReferenceRepository, DieselSettingsRepository, DieselTaskRepository,
    DieselUserRepository,
};
use tracing::info;

/// Driven ports shared by every service.
#[derive(Clone)]
pub(crate) struct Repositories {
    users: Arc<dyn UserRepository>,
    applications: Arc<dyn ApplicationRepository>,
    announcements: Arc<dyn AnnouncementRepository>,
    tasks: Arc<dyn TaskRepository>,
    settings: Arc<dyn SettingsRepository>,
    reference: Arc<dyn ReferenceRepository>,
}

impl Repositories {
    /// Pick the storage backend for the configured pool.
    pub(crate) fn for_pool(pool: Option<&DbPool>) -> Self {
        match pool {
            Some(pool) => {
                info!(backend = "postgres", "repositories configured");
                Self::diesel(pool)
            }
            None => {
                info!(backend = "memory", "repositories configured");
                Self::in_memory(InMemoryStore::default())
            }
        }
    }

    fn diesel(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            applications: Arc::new(DieselApplicationRepository::new(pool.clone())),
            announcements: Arc::new(DieselAnnouncementRepository::new(pool.clone())),
            tasks: Arc::new(DieselTaskRepository::new(pool.clone())),
            settings: Arc::new(DieselSettingsRepository::new(pool.clone())),
            reference: Arc::new(DieselReferenceRepository::new(pool.clone())),
        }
    }

    fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            applications: store.clone(),
            announcements: store.clone(),
            tasks: store.clone(),
            settings: store.clone(),
            reference: store,
        }
    }

    /// Seed the administrator, the applications gate and reference data.
    pub(crate) async fn bootstrap(
        &self,
        hasher: &dyn PasswordHasher,
        admin_password: Option<&str>,
    ) -> Result<BootstrapReport, Error> {
        let ports = BootstrapPorts {
            users: self.users.as_ref(),
            settings: self.settings.as_ref(),
            reference: self.reference.as_ref(),
            hasher,
        };
        bootstrap(&ports, admin_password).await
    }

    /// Build the driving services over these repositories.
    pub(crate) fn into_http_state(self, hasher: Arc<dyn PasswordHasher>) -> HttpState {
        let Self {
            users,
            applications,
            announcements,
            tasks,
            settings,
            reference,
        } = self;
        HttpState {
            accounts: Arc::new(AccountService::new(users.clone(), hasher)),
            applications: Arc::new(ApplicationService::new(applications, settings.clone())),
            notice_board: Arc::new(NoticeBoardService::new(announcements, tasks)),
            settings: Arc::new(SettingsService::new(settings)),
            administration: Arc::new(AdminService::new(users)),
            reference: Arc::new(ReferenceDataService::new(reference)),
        }
    }
}
