//! Startup seeding.
//!
//! Idempotent: each step only writes when its data is missing, so the
//! routine can run on every start.

use tracing::info;

use crate::domain::account_service::{map_hasher_error, map_user_error};
use crate::domain::ports::{
    PasswordHasher, ReferenceRepository, ReferenceRepositoryError, SettingsRepository,
    UserRepository,
};
use crate::domain::settings_service::map_settings_error;
use crate::domain::{
    DEFAULT_RANKS, DEFAULT_RULES, Error, NewUser, Role, SettingKey, Username,
};

/// Username of the seeded administrator.
pub const ADMIN_USERNAME: &str = "admin";

/// Ports touched while seeding.
pub struct BootstrapPorts<'a> {
    pub users: &'a dyn UserRepository,
    pub settings: &'a dyn SettingsRepository,
    pub reference: &'a dyn ReferenceRepository,
    pub hasher: &'a dyn PasswordHasher,
}

/// What a bootstrap run wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub admin_created: bool,
    pub gate_initialised: bool,
    pub ranks_seeded: bool,
    pub rules_seeded: bool,
}

/// Seed the administrator, the applications gate and reference data.
///
/// The administrator is only created when `admin_password` is provided.
///
/// # Errors
/// Propagates storage and hashing failures as internal errors.
pub async fn bootstrap(
    ports: &BootstrapPorts<'_>,
    admin_password: Option<&str>,
) -> Result<BootstrapReport, Error> {
    let mut report = BootstrapReport::default();

    if let Some(password) = admin_password {
        report.admin_created = seed_admin(ports, password).await?;
    }

    if ports
        .settings
        .get(SettingKey::ApplicationsOpen)
        .await
        .map_err(map_settings_error)?
        .is_none()
    {
        ports
            .settings
            .upsert(SettingKey::ApplicationsOpen, "true")
            .await
            .map_err(map_settings_error)?;
        report.gate_initialised = true;
    }

    let reference_error = |err: ReferenceRepositoryError| Error::internal(format!("reference seeding failed: {err}"));
    if ports.reference.ranks().await.map_err(reference_error)?.is_empty() {
        ports
            .reference
            .insert_ranks(&DEFAULT_RANKS)
            .await
            .map_err(reference_error)?;
        report.ranks_seeded = true;
    }
    if ports.reference.rules().await.map_err(reference_error)?.is_empty() {
        ports
            .reference
            .insert_rules(&DEFAULT_RULES)
            .await
            .map_err(reference_error)?;
        report.rules_seeded = true;
    }

    info!(
        admin_created = report.admin_created,
        gate_initialised = report.gate_initialised,
        ranks_seeded = report.ranks_seeded,
        rules_seeded = report.rules_seeded,
        "bootstrap complete"
    );
    Ok(report)
}

async fn seed_admin(ports: &BootstrapPorts<'_>, password: &str) -> Result<bool, Error> {
    if ports
        .users
        .find_account(ADMIN_USERNAME)
        .await
        .map_err(map_user_error)?
        .is_some()
    {
        return Ok(false);
    }
    let username = Username::new(ADMIN_USERNAME)
        .map_err(|err| Error::internal(format!("invalid admin username: {err}")))?;
    let password_hash = ports.hasher.hash(password).await.map_err(map_hasher_error)?;
    ports
        .users
        .insert(&NewUser {
            username,
            password_hash,
            discord: None,
            role: Role::Admin,
        })
        .await
        .map_err(map_user_error)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        MockPasswordHasher, MockReferenceRepository, MockSettingsRepository, MockUserRepository,
    };
    use crate::domain::{Rank, Rule, User, UserAccount, UserId};
    use chrono::{DateTime, Utc};

    fn seeded_reference() -> MockReferenceRepository {
        let mut reference = MockReferenceRepository::new();
        reference.expect_ranks().returning(|| {
            Ok(vec![Rank {
                id: 1,
                title: "Police Chief".to_owned(),
                name: "Chief".to_owned(),
                code: "A-1".to_owned(),
                order: 1,
            }])
        });
        reference.expect_rules().returning(|| {
            Ok(vec![Rule {
                id: 1,
                content: "salute".to_owned(),
                category: "general".to_owned(),
            }])
        });
        reference.expect_insert_ranks().never();
        reference.expect_insert_rules().never();
        reference
    }

    #[tokio::test]
    async fn seeds_everything_into_empty_storage() {
        let mut users = MockUserRepository::new();
        users.expect_find_account().return_once(|_| Ok(None));
        users
            .expect_insert()
            .withf(|new| new.role == Role::Admin && new.username.as_str() == ADMIN_USERNAME)
            .times(1)
            .return_once(|new| {
                Ok(User {
                    id: UserId::from_stored(1),
                    username: new.username.as_str().to_owned(),
                    discord: None,
                    role: Role::Admin,
                    created_at: DateTime::<Utc>::UNIX_EPOCH,
                })
            });
        let mut settings = MockSettingsRepository::new();
        settings.expect_get().return_once(|_| Ok(None));
        settings
            .expect_upsert()
            .withf(|key, json| *key == SettingKey::ApplicationsOpen && json == "true")
            .times(1)
            .return_once(|_, _| Ok(()));
        let mut reference = MockReferenceRepository::new();
        reference.expect_ranks().return_once(|| Ok(Vec::new()));
        reference.expect_rules().return_once(|| Ok(Vec::new()));
        reference
            .expect_insert_ranks()
            .withf(|ranks| ranks.len() == DEFAULT_RANKS.len())
            .times(1)
            .return_once(|_| Ok(()));
        reference
            .expect_insert_rules()
            .withf(|rules| rules.len() == DEFAULT_RULES.len())
            .times(1)
            .return_once(|_| Ok(()));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .return_once(|_| Ok("encoded".to_owned()));

        let report = bootstrap(
            &BootstrapPorts {
                users: &users,
                settings: &settings,
                reference: &reference,
                hasher: &hasher,
            },
            Some("adminpassword"),
        )
        .await
        .expect("bootstrap");

        assert_eq!(
            report,
            BootstrapReport {
                admin_created: true,
                gate_initialised: true,
                ranks_seeded: true,
                rules_seeded: true,
            }
        );
    }

    #[tokio::test]
    async fn leaves_existing_state_untouched() {
        let mut users = MockUserRepository::new();
        users.expect_find_account().return_once(|_| {
            Ok(Some(UserAccount {
                user: User {
                    id: UserId::from_stored(1),
                    username: ADMIN_USERNAME.to_owned(),
                    discord: None,
                    role: Role::Admin,
                    created_at: DateTime::<Utc>::UNIX_EPOCH,
                },
                password_hash: "encoded".to_owned(),
            }))
        });
        users.expect_insert().never();
        let mut settings = MockSettingsRepository::new();
        settings
            .expect_get()
            .return_once(|_| Ok(Some("false".to_owned())));
        settings.expect_upsert().never();
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();
        let reference = seeded_reference();

        let report = bootstrap(
            &BootstrapPorts {
                users: &users,
                settings: &settings,
                reference: &reference,
                hasher: &hasher,
            },
            Some("adminpassword"),
        )
        .await
        .expect("bootstrap");
        assert_eq!(report, BootstrapReport::default());
    }

    #[tokio::test]
    async fn skips_admin_without_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_account().never();
        let mut settings = MockSettingsRepository::new();
        settings
            .expect_get()
            .return_once(|_| Ok(Some("true".to_owned())));
        let hasher = MockPasswordHasher::new();
        let reference = seeded_reference();

        let report = bootstrap(
            &BootstrapPorts {
                users: &users,
                settings: &settings,
                reference: &reference,
                hasher: &hasher,
            },
            None,
        )
        .await
        .expect("bootstrap");
        assert!(!report.admin_created);
    }
}
