//! Process-local store implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. All tables sit behind one mutex so the single-pending rule is
//! checked and applied atomically, matching the partial unique index used by
//! the PostgreSQL adapter.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    AnnouncementRepository, ApplicationRepository, ApplicationRepositoryError,
    NoticeBoardRepositoryError, ReferenceRepository, ReferenceRepositoryError, SettingsRepository,
    SettingsRepositoryError, TaskRepository, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Announcement, AnnouncementId, Applicant, Application, ApplicationId, ApplicationRecord,
    ApplicationStatus, NewApplication, NewRank, NewRule, NewUser, NoticeContent, Rank, Role, Rule,
    SettingKey, Task, TaskId, User, UserAccount, UserId,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, UserAccount>,
    applications: BTreeMap<i32, Application>,
    announcements: BTreeMap<i32, Announcement>,
    tasks: BTreeMap<i32, Task>,
    settings: BTreeMap<&'static str, String>,
    ranks: Vec<Rank>,
    rules: Vec<Rule>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn applicant(&self, owner: UserId) -> Applicant {
        self.users.get(&owner.get()).map_or_else(
            || Applicant {
                username: String::new(),
                discord: None,
            },
            |account| Applicant {
                username: account.user.username.clone(),
                discord: account.user.discord.clone(),
            },
        )
    }

    fn has_other_pending(&self, candidate: &Application) -> bool {
        self.applications.values().any(|existing| {
            existing.id != candidate.id
                && existing.owner == candidate.owner
                && existing.kind() == candidate.kind()
                && existing.status == ApplicationStatus::Pending
        })
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, i32)) {
    items.sort_by_key(|item| std::cmp::Reverse(key(item)));
}

/// In-memory implementation of the portal's repositories.
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryStore {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            clock,
        }
    }

    fn lock<E>(&self, poisoned: impl FnOnce(&'static str) -> E) -> Result<MutexGuard<'_, Tables>, E> {
        self.tables.lock().map_err(|_| poisoned(POISONED))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut tables = self.lock(UserRepositoryError::query)?;
        if tables
            .users
            .values()
            .any(|account| account.user.username == user.username.as_str())
        {
            return Err(UserRepositoryError::duplicate_username(user.username.as_str()));
        }
        let id = tables.next_id();
        let stored = User {
            id: UserId::from_stored(id),
            username: user.username.as_str().to_owned(),
            discord: user.discord.clone(),
            role: user.role,
            created_at: self.clock.utc(),
        };
        tables.users.insert(
            id,
            UserAccount {
                user: stored.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(stored)
    }

    async fn find_account(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        let tables = self.lock(UserRepositoryError::query)?;
        Ok(tables
            .users
            .values()
            .find(|account| account.user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.lock(UserRepositoryError::query)?;
        Ok(tables
            .users
            .get(&id.get())
            .map(|account| account.user.clone()))
    }

    async fn set_role(&self, id: UserId, role: Role) -> Result<bool, UserRepositoryError> {
        let mut tables = self.lock(UserRepositoryError::query)?;
        Ok(tables
            .users
            .get_mut(&id.get())
            .map(|account| account.user.role = role)
            .is_some())
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let tables = self.lock(UserRepositoryError::query)?;
        Ok(tables
            .users
            .values()
            .map(|account| account.user.clone())
            .collect())
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn insert_pending(
        &self,
        application: &NewApplication,
    ) -> Result<Application, ApplicationRepositoryError> {
        let mut tables = self.lock(ApplicationRepositoryError::query)?;
        let mut stored = Application {
            id: ApplicationId::from_stored(0),
            owner: application.owner,
            content: application.content.clone(),
            status: ApplicationStatus::Pending,
            created_at: self.clock.utc(),
        };
        if tables.has_other_pending(&stored) {
            return Err(ApplicationRepositoryError::pending_conflict(
                stored.owner,
                stored.kind(),
            ));
        }
        let id = tables.next_id();
        stored.id = ApplicationId::from_stored(id);
        tables.applications.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<ApplicationRecord>, ApplicationRepositoryError> {
        let tables = self.lock(ApplicationRepositoryError::query)?;
        let mut records: Vec<ApplicationRecord> = tables
            .applications
            .values()
            .map(|application| ApplicationRecord {
                applicant: tables.applicant(application.owner),
                application: application.clone(),
            })
            .collect();
        newest_first(&mut records, |record| {
            (record.application.created_at, record.application.id.get())
        });
        Ok(records)
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<ApplicationRecord>, ApplicationRepositoryError> {
        let mut records = self.list_all().await?;
        records.retain(|record| record.application.owner == owner);
        Ok(records)
    }

    async fn set_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut tables = self.lock(ApplicationRepositoryError::query)?;
        let Some(current) = tables.applications.get(&id.get()).cloned() else {
            return Ok(None);
        };
        let updated = Application { status, ..current };
        if status == ApplicationStatus::Pending && tables.has_other_pending(&updated) {
            return Err(ApplicationRepositoryError::pending_conflict(
                updated.owner,
                updated.kind(),
            ));
        }
        tables.applications.insert(id.get(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationRepositoryError> {
        let mut tables = self.lock(ApplicationRepositoryError::query)?;
        Ok(tables.applications.remove(&id.get()).is_some())
    }
}

#[async_trait]
impl AnnouncementRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Announcement>, NoticeBoardRepositoryError> {
        let tables = self.lock(NoticeBoardRepositoryError::query)?;
        let mut items: Vec<Announcement> = tables.announcements.values().cloned().collect();
        newest_first(&mut items, |item| (item.created_at, item.id.get()));
        Ok(items)
    }

    async fn insert(
        &self,
        content: &NoticeContent,
        author: UserId,
    ) -> Result<Announcement, NoticeBoardRepositoryError> {
        let mut tables = self.lock(NoticeBoardRepositoryError::query)?;
        let id = tables.next_id();
        let announcement = Announcement {
            id: AnnouncementId::from_stored(id),
            content: content.as_str().to_owned(),
            created_by: Some(author),
            created_at: self.clock.utc(),
        };
        tables.announcements.insert(id, announcement.clone());
        Ok(announcement)
    }

    async fn delete(&self, id: AnnouncementId) -> Result<bool, NoticeBoardRepositoryError> {
        let mut tables = self.lock(NoticeBoardRepositoryError::query)?;
        Ok(tables.announcements.remove(&id.get()).is_some())
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Task>, NoticeBoardRepositoryError> {
        let tables = self.lock(NoticeBoardRepositoryError::query)?;
        let mut items: Vec<Task> = tables
            .tasks
            .values()
            .map(|task| Task {
                creator: tables
                    .users
                    .get(&task.created_by.get())
                    .map(|account| account.user.username.clone()),
                ..task.clone()
            })
            .collect();
        newest_first(&mut items, |item| (item.created_at, item.id.get()));
        Ok(items)
    }

    async fn insert(
        &self,
        content: &NoticeContent,
        author: UserId,
    ) -> Result<Task, NoticeBoardRepositoryError> {
        let mut tables = self.lock(NoticeBoardRepositoryError::query)?;
        let id = tables.next_id();
        let task = Task {
            id: TaskId::from_stored(id),
            content: content.as_str().to_owned(),
            created_by: author,
            creator: tables
                .users
                .get(&author.get())
                .map(|account| account.user.username.clone()),
            created_at: self.clock.utc(),
        };
        tables.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> Result<bool, NoticeBoardRepositoryError> {
        let mut tables = self.lock(NoticeBoardRepositoryError::query)?;
        Ok(tables.tasks.remove(&id.get()).is_some())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryStore {
    async fn get(&self, key: SettingKey) -> Result<Option<String>, SettingsRepositoryError> {
        let tables = self.lock(SettingsRepositoryError::query)?;
        Ok(tables.settings.get(key.as_str()).cloned())
    }

    async fn upsert(&self, key: SettingKey, json: &str) -> Result<(), SettingsRepositoryError> {
        let mut tables = self.lock(SettingsRepositoryError::query)?;
        tables.settings.insert(key.as_str(), json.to_owned());
        Ok(())
    }
}

#[async_trait]
impl ReferenceRepository for InMemoryStore {
    async fn ranks(&self) -> Result<Vec<Rank>, ReferenceRepositoryError> {
        let tables = self.lock(ReferenceRepositoryError::query)?;
        let mut ranks = tables.ranks.clone();
        ranks.sort_by_key(|rank| (rank.order, rank.id));
        Ok(ranks)
    }

    async fn rules(&self) -> Result<Vec<Rule>, ReferenceRepositoryError> {
        let tables = self.lock(ReferenceRepositoryError::query)?;
        Ok(tables.rules.clone())
    }

    async fn insert_ranks(&self, ranks: &[NewRank]) -> Result<(), ReferenceRepositoryError> {
        let mut tables = self.lock(ReferenceRepositoryError::query)?;
        for rank in ranks {
            let id = i32::try_from(tables.ranks.len() + 1)
                .map_err(|err| ReferenceRepositoryError::query(err.to_string()))?;
            tables.ranks.push(Rank {
                id,
                title: rank.title.to_owned(),
                name: rank.name.to_owned(),
                code: rank.code.to_owned(),
                order: rank.order,
            });
        }
        Ok(())
    }

    async fn insert_rules(&self, rules: &[NewRule]) -> Result<(), ReferenceRepositoryError> {
        let mut tables = self.lock(ReferenceRepositoryError::query)?;
        for rule in rules {
            let id = i32::try_from(tables.rules.len() + 1)
                .map_err(|err| ReferenceRepositoryError::query(err.to_string()))?;
            tables.rules.push(Rule {
                id,
                content: rule.content.to_owned(),
                category: rule.category.to_owned(),
            });
        }
        Ok(())
    }
}
