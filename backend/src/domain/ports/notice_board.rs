//! Driving port for announcements and weekly tasks.

use async_trait::async_trait;

use crate::domain::{Announcement, AnnouncementId, Caller, Error, NoticeContent, Task, TaskId};

/// Notice board use-cases called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoticeBoard: Send + Sync {
    /// Announcements, newest first.
    async fn announcements(&self, caller: &Caller) -> Result<Vec<Announcement>, Error>;

    /// Publish an announcement authored by the caller.
    async fn post_announcement(
        &self,
        caller: &Caller,
        content: &NoticeContent,
    ) -> Result<Announcement, Error>;

    /// Delete an announcement; unknown ids succeed.
    async fn remove_announcement(&self, caller: &Caller, id: AnnouncementId) -> Result<(), Error>;

    /// Weekly tasks, newest first.
    async fn tasks(&self, caller: &Caller) -> Result<Vec<Task>, Error>;

    /// Publish a weekly task authored by the caller.
    async fn post_task(&self, caller: &Caller, content: &NoticeContent) -> Result<Task, Error>;

    /// Delete a weekly task; unknown ids succeed.
    async fn remove_task(&self, caller: &Caller, id: TaskId) -> Result<(), Error>;
}
