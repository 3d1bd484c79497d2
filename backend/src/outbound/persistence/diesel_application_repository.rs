//! PostgreSQL-backed `ApplicationRepository`.
//!
//! The single-pending rule is enforced by the partial unique index
//! `applications_one_pending_per_type`; a violation of that index on insert
//! or on a status change maps to `PendingConflict`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{
    AcademyForm, Applicant, Application, ApplicationContent, ApplicationId, ApplicationRecord,
    ApplicationStatus, ApplicationType, NewApplication, PoliceAnswers, UserId,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{ApplicationRow, NewApplicationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{applications, users};

const PENDING_INDEX: &str = "applications_one_pending_per_type";

/// Diesel implementation of [`ApplicationRepository`].
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ApplicationRepositoryError {
    map_basic_pool_error(error, ApplicationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ApplicationRepositoryError {
    map_basic_diesel_error(
        error,
        ApplicationRepositoryError::query,
        ApplicationRepositoryError::connection,
    )
}

fn map_write_error(
    error: diesel::result::Error,
    owner: UserId,
    kind: ApplicationType,
) -> ApplicationRepositoryError {
    match unique_violation(&error) {
        Some(PENDING_INDEX) => ApplicationRepositoryError::pending_conflict(owner, kind),
        _ => map_diesel_error(error),
    }
}

fn corrupt(id: i32, what: &str) -> ApplicationRepositoryError {
    warn!(application_id = id, what, "stored application is malformed");
    ApplicationRepositoryError::query(format!("corrupt {what} for application {id}"))
}

fn row_to_application(row: ApplicationRow) -> Result<Application, ApplicationRepositoryError> {
    let kind = row
        .kind
        .parse::<ApplicationType>()
        .map_err(|_| corrupt(row.id, "type"))?;
    let status = row
        .status
        .parse::<ApplicationStatus>()
        .map_err(|_| corrupt(row.id, "status"))?;
    let content = match kind {
        ApplicationType::Academy => ApplicationContent::Academy(AcademyForm {
            char_name: row.char_name,
            discord: row.discord,
            experience: row.experience,
            joined_before: row.joined_before,
        }),
        ApplicationType::Police => ApplicationContent::Police(PoliceAnswers {
            protocols: serde_json::from_value(row.protocols)
                .map_err(|_| corrupt(row.id, "protocols"))?,
            answers: serde_json::from_value(row.answers).map_err(|_| corrupt(row.id, "answers"))?,
        }),
    };
    Ok(Application {
        id: ApplicationId::from_stored(row.id),
        owner: UserId::from_stored(row.user_id),
        content,
        status,
        created_at: row.created_at,
    })
}

fn joined_to_record(
    (row, username, discord): (ApplicationRow, String, Option<String>),
) -> Result<ApplicationRecord, ApplicationRepositoryError> {
    Ok(ApplicationRecord {
        application: row_to_application(row)?,
        applicant: Applicant { username, discord },
    })
}

fn new_row(application: &NewApplication) -> Result<NewApplicationRow<'_>, ApplicationRepositoryError> {
    let encode = |value: Result<serde_json::Value, serde_json::Error>| {
        value.map_err(|err| ApplicationRepositoryError::query(err.to_string()))
    };
    let row = match &application.content {
        ApplicationContent::Academy(form) => NewApplicationRow {
            user_id: application.owner.get(),
            kind: ApplicationType::Academy.as_str(),
            char_name: form.char_name.as_deref(),
            discord: form.discord.as_deref(),
            experience: form.experience.as_deref(),
            joined_before: form.joined_before.as_deref(),
            protocols: serde_json::Value::Array(Vec::new()),
            answers: serde_json::Value::Object(serde_json::Map::new()),
            status: ApplicationStatus::Pending.as_str(),
        },
        ApplicationContent::Police(quiz) => NewApplicationRow {
            user_id: application.owner.get(),
            kind: ApplicationType::Police.as_str(),
            char_name: None,
            discord: None,
            experience: None,
            joined_before: None,
            protocols: encode(serde_json::to_value(&quiz.protocols))?,
            answers: encode(serde_json::to_value(&quiz.answers))?,
            status: ApplicationStatus::Pending.as_str(),
        },
    };
    Ok(row)
}

impl DieselApplicationRepository {
    async fn load_records(
        &self,
        owner: Option<UserId>,
    ) -> Result<Vec<ApplicationRecord>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = applications::table
            .inner_join(users::table)
            .select((ApplicationRow::as_select(), users::username, users::discord))
            .order_by((applications::created_at.desc(), applications::id.desc()))
            .into_boxed();
        if let Some(owner) = owner {
            query = query.filter(applications::user_id.eq(owner.get()));
        }
        let rows: Vec<(ApplicationRow, String, Option<String>)> =
            query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(joined_to_record).collect()
    }
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn insert_pending(
        &self,
        application: &NewApplication,
    ) -> Result<Application, ApplicationRepositoryError> {
        let row = new_row(application)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored: ApplicationRow = diesel::insert_into(applications::table)
            .values(&row)
            .returning(ApplicationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, application.owner, application.content.kind()))?;
        row_to_application(stored)
    }

    async fn list_all(&self) -> Result<Vec<ApplicationRecord>, ApplicationRepositoryError> {
        self.load_records(None).await
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<ApplicationRecord>, ApplicationRepositoryError> {
        self.load_records(Some(owner)).await
    }

    async fn set_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let result = diesel::update(applications::table.find(id.get()))
            .set(applications::status.eq(status.as_str()))
            .returning(ApplicationRow::as_returning())
            .get_result::<ApplicationRow>(&mut conn)
            .await
            .optional();
        match result {
            Ok(row) => row.map(row_to_application).transpose(),
            Err(err) if unique_violation(&err) == Some(PENDING_INDEX) => {
                let current: ApplicationRow = applications::table
                    .find(id.get())
                    .select(ApplicationRow::as_select())
                    .first(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                let conflicting = row_to_application(current)?;
                Err(ApplicationRepositoryError::pending_conflict(
                    conflicting.owner,
                    conflicting.kind(),
                ))
            }
            Err(err) => Err(map_diesel_error(err)),
        }
    }

    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(applications::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
