#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{Notification, NotificationStatus};
use crate::domain::visibility::FeedQuery;
use crate::error::NotificationsServiceError;

/// Field changes applied by a single mutation. `updated_at` is always
/// stamped; `status`/`read_at` only when present.
#[derive(Debug, Clone)]
pub struct NotificationChange {
    pub status: Option<NotificationStatus>,
    pub read_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Store contract for notification rows.
pub trait NotificationRepository: Send + Sync {
    /// Rows admitted by the query, newest first, truncated to its limit.
    async fn list(&self, query: &FeedQuery) -> Result<Vec<Notification>, NotificationsServiceError>;

    async fn insert(&self, notification: &Notification)
    -> Result<(), NotificationsServiceError>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Notification>, NotificationsServiceError>;

    /// Apply a change to one row. Returns the updated row, or `None` if
    /// the id is unknown. Last write wins; no concurrency token is
    /// checked.
    async fn update(
        &self,
        id: Uuid,
        change: &NotificationChange,
    ) -> Result<Option<Notification>, NotificationsServiceError>;

    /// Delete one row. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, NotificationsServiceError>;

    /// Delete every row. Returns the number of rows removed.
    async fn delete_all(&self) -> Result<u64, NotificationsServiceError>;
}
