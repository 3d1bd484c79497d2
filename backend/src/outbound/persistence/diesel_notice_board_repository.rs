//! PostgreSQL-backed announcement and task repositories.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AnnouncementRepository, NoticeBoardRepositoryError, TaskRepository};
use crate::domain::{Announcement, AnnouncementId, NoticeContent, Task, TaskId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AnnouncementRow, NewAnnouncementRow, NewTaskRow, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::{announcements, tasks, users};

fn map_pool_error(error: PoolError) -> NoticeBoardRepositoryError {
    map_basic_pool_error(error, NoticeBoardRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> NoticeBoardRepositoryError {
    map_basic_diesel_error(
        error,
        NoticeBoardRepositoryError::query,
        NoticeBoardRepositoryError::connection,
    )
}

impl From<AnnouncementRow> for Announcement {
    fn from(row: AnnouncementRow) -> Self {
        Self {
            id: AnnouncementId::from_stored(row.id),
            content: row.content,
            created_by: row.created_by.map(UserId::from_stored),
            created_at: row.created_at,
        }
    }
}

fn task_from_row(row: TaskRow, creator: Option<String>) -> Task {
    Task {
        id: TaskId::from_stored(row.id),
        content: row.content,
        created_by: UserId::from_stored(row.created_by),
        creator,
        created_at: row.created_at,
    }
}

/// Diesel implementation of [`AnnouncementRepository`].
#[derive(Clone)]
pub struct DieselAnnouncementRepository {
    pool: DbPool,
}

impl DieselAnnouncementRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementRepository for DieselAnnouncementRepository {
    async fn list(&self) -> Result<Vec<Announcement>, NoticeBoardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AnnouncementRow> = announcements::table
            .select(AnnouncementRow::as_select())
            .order_by((announcements::created_at.desc(), announcements::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Announcement::from).collect())
    }

    async fn insert(
        &self,
        content: &NoticeContent,
        author: UserId,
    ) -> Result<Announcement, NoticeBoardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(announcements::table)
            .values(&NewAnnouncementRow {
                content: content.as_str(),
                created_by: Some(author.get()),
            })
            .returning(AnnouncementRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Announcement::from)
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: AnnouncementId) -> Result<bool, NoticeBoardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(announcements::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}

/// Diesel implementation of [`TaskRepository`].
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, NoticeBoardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(TaskRow, Option<String>)> = tasks::table
            .left_join(users::table)
            .select((TaskRow::as_select(), users::username.nullable()))
            .order_by((tasks::created_at.desc(), tasks::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(row, creator)| task_from_row(row, creator))
            .collect())
    }

    async fn insert(
        &self,
        content: &NoticeContent,
        author: UserId,
    ) -> Result<Task, NoticeBoardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: TaskRow = diesel::insert_into(tasks::table)
            .values(&NewTaskRow {
                content: content.as_str(),
                created_by: author.get(),
            })
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let creator: Option<String> = users::table
            .find(author.get())
            .select(users::username)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(task_from_row(row, creator))
    }

    async fn delete(&self, id: TaskId) -> Result<bool, NoticeBoardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(tasks::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
