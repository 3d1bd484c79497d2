//! Ports for announcement and weekly task persistence.

use async_trait::async_trait;

use crate::domain::{Announcement, AnnouncementId, NoticeContent, Task, TaskId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notice board storage.
    pub enum NoticeBoardRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "notice board connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "notice board query failed: {message}",
    }
}

/// Announcement storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Every announcement, newest first.
    async fn list(&self) -> Result<Vec<Announcement>, NoticeBoardRepositoryError>;

    /// Store a new announcement.
    async fn insert(
        &self,
        content: &NoticeContent,
        author: UserId,
    ) -> Result<Announcement, NoticeBoardRepositoryError>;

    /// Delete an announcement. Returns `false` when nothing was removed.
    async fn delete(&self, id: AnnouncementId) -> Result<bool, NoticeBoardRepositoryError>;
}

/// Weekly task storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Every task joined with its creator, newest first.
    async fn list(&self) -> Result<Vec<Task>, NoticeBoardRepositoryError>;

    /// Store a new task.
    async fn insert(
        &self,
        content: &NoticeContent,
        author: UserId,
    ) -> Result<Task, NoticeBoardRepositoryError>;

    /// Delete a task. Returns `false` when nothing was removed.
    async fn delete(&self, id: TaskId) -> Result<bool, NoticeBoardRepositoryError>;
}
