use crate::domain::repository::NotificationRepository;
use crate::domain::types::{
    DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT, Notification, NotificationStatus, Priority,
};
use crate::domain::visibility::{Audience, FeedQuery, StatusFilter};
use crate::error::NotificationsServiceError;

pub struct ListNotificationsInput {
    pub role: Option<String>,
    pub user_id: Option<i64>,
    pub client_only: bool,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub limit: Option<u64>,
}

/// A feed page: the admitted rows (newest first) plus the counts the
/// portal badge needs.
pub struct NotificationFeed {
    pub notifications: Vec<Notification>,
    pub count: usize,
    pub unread_count: usize,
}

pub struct ListNotificationsUseCase<R: NotificationRepository> {
    pub repo: R,
}

impl<R: NotificationRepository> ListNotificationsUseCase<R> {
    pub async fn execute(
        &self,
        input: ListNotificationsInput,
    ) -> Result<NotificationFeed, NotificationsServiceError> {
        let status = match input.status.as_deref() {
            None => StatusFilter::ExcludeArchived,
            Some(s) => StatusFilter::Only(
                NotificationStatus::parse(s).ok_or(NotificationsServiceError::UnknownStatus)?,
            ),
        };
        let priority = match input.priority.as_deref() {
            None => None,
            Some(p) => {
                Some(Priority::parse(p).ok_or(NotificationsServiceError::UnknownPriority)?)
            }
        };

        let audience = Audience::resolve(
            input.role.as_deref(),
            input.user_id,
            input.client_only,
        );
        let query = FeedQuery {
            predicate: audience.predicate(),
            status,
            priority,
            limit: input
                .limit
                .unwrap_or(DEFAULT_FEED_LIMIT)
                .clamp(1, MAX_FEED_LIMIT),
        };

        let notifications = self.repo.list(&query).await?;
        let unread_count = notifications
            .iter()
            .filter(|n| n.status == NotificationStatus::Unread)
            .count();

        Ok(NotificationFeed {
            count: notifications.len(),
            unread_count,
            notifications,
        })
    }
}
