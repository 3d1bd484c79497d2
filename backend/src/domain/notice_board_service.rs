//! Announcement and weekly task service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AnnouncementRepository, NoticeBoardRepositoryError, NoticeBoard, TaskRepository,
};
use crate::domain::{
    Action, Announcement, AnnouncementId, Caller, Error, NoticeContent, Task, TaskId, authorize,
    authorize_member,
};

fn map_notice_error(error: NoticeBoardRepositoryError) -> Error {
    Error::internal(format!("notice board error: {error}"))
}

/// Notice board service implementing [`NoticeBoard`].
#[derive(Clone)]
pub struct NoticeBoardService<A: ?Sized, T: ?Sized> {
    announcements: Arc<A>,
    tasks: Arc<T>,
}

impl<A: ?Sized, T: ?Sized> NoticeBoardService<A, T> {
    /// Create a new service with the given repositories.
    pub fn new(announcements: Arc<A>, tasks: Arc<T>) -> Self {
        Self {
            announcements,
            tasks,
        }
    }
}

#[async_trait]
impl<A, T> NoticeBoard for NoticeBoardService<A, T>
where
    A: AnnouncementRepository + ?Sized,
    T: TaskRepository + ?Sized,
{
    async fn announcements(&self, caller: &Caller) -> Result<Vec<Announcement>, Error> {
        authorize(caller, Action::ListAnnouncements)?;
        self.announcements.list().await.map_err(map_notice_error)
    }

    async fn post_announcement(
        &self,
        caller: &Caller,
        content: &NoticeContent,
    ) -> Result<Announcement, Error> {
        let member = authorize_member(caller, Action::CreateAnnouncement)?;
        let announcement = self
            .announcements
            .insert(content, member.user_id)
            .await
            .map_err(map_notice_error)?;
        info!(announcement_id = %announcement.id, author = %member.user_id, "announcement posted");
        Ok(announcement)
    }

    async fn remove_announcement(&self, caller: &Caller, id: AnnouncementId) -> Result<(), Error> {
        authorize(caller, Action::DeleteAnnouncement)?;
        if !self
            .announcements
            .delete(id)
            .await
            .map_err(map_notice_error)?
        {
            debug!(announcement_id = %id, "delete of unknown announcement ignored");
        }
        Ok(())
    }

    async fn tasks(&self, caller: &Caller) -> Result<Vec<Task>, Error> {
        authorize(caller, Action::ListTasks)?;
        self.tasks.list().await.map_err(map_notice_error)
    }

    async fn post_task(&self, caller: &Caller, content: &NoticeContent) -> Result<Task, Error> {
        let member = authorize_member(caller, Action::CreateTask)?;
        let task = self
            .tasks
            .insert(content, member.user_id)
            .await
            .map_err(map_notice_error)?;
        info!(task_id = %task.id, author = %member.user_id, "task posted");
        Ok(task)
    }

    async fn remove_task(&self, caller: &Caller, id: TaskId) -> Result<(), Error> {
        authorize(caller, Action::DeleteTask)?;
        if !self.tasks.delete(id).await.map_err(map_notice_error)? {
            debug!(task_id = %id, "delete of unknown task ignored");
        }
        Ok(())
    }
}
