use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::{NotificationChange, NotificationRepository};
use crate::domain::types::{Notification, NotificationStatus};
use crate::error::NotificationsServiceError;

pub struct UpdateNotificationInput {
    pub id: Option<Uuid>,
    pub status: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
}

pub struct UpdateNotificationUseCase<R: NotificationRepository> {
    pub repo: R,
}

impl<R: NotificationRepository> UpdateNotificationUseCase<R> {
    pub async fn execute(
        &self,
        input: UpdateNotificationInput,
    ) -> Result<Notification, NotificationsServiceError> {
        let id = input
            .id
            .ok_or(NotificationsServiceError::NotificationIdRequired)?;
        let status = match input.status.as_deref() {
            None => None,
            Some(s) => Some(
                NotificationStatus::parse(s).ok_or(NotificationsServiceError::UnknownStatus)?,
            ),
        };

        if let Some(next) = status {
            let current = self
                .repo
                .find_by_id(id)
                .await?
                .ok_or(NotificationsServiceError::NotificationNotFound)?;
            if !current.status.allows_transition_to(next) {
                return Err(NotificationsServiceError::InvalidStatusTransition);
            }
        }

        let now = Utc::now();
        // Marking read stamps read_at; an explicit caller timestamp wins.
        let read_at = match (status, input.read_at) {
            (Some(NotificationStatus::Read), None) => Some(now),
            (_, supplied) => supplied,
        };
        let change = NotificationChange {
            status,
            read_at,
            updated_at: now,
        };

        self.repo
            .update(id, &change)
            .await?
            .ok_or(NotificationsServiceError::NotificationNotFound)
    }
}
