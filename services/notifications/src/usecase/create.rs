use chrono::Utc;
use uuid::Uuid;

use domus_domain::role;

use crate::domain::repository::NotificationRepository;
use crate::domain::types::{Notification, NotificationStatus, Priority, RecipientTarget};
use crate::error::NotificationsServiceError;

pub struct CreateNotificationInput {
    pub title: Option<String>,
    pub message: Option<String>,
    pub icon: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub notification_type: Option<String>,
    pub source_table: Option<String>,
    pub source_table_display_name: Option<String>,
    pub source_record_id: Option<String>,
    pub recipient_role: Option<String>,
    pub recipient_id: RecipientTarget,
    pub data: Option<serde_json::Value>,
    pub action_url: Option<String>,
}

pub struct CreateNotificationUseCase<R: NotificationRepository> {
    pub repo: R,
}

impl<R: NotificationRepository> CreateNotificationUseCase<R> {
    pub async fn execute(
        &self,
        input: CreateNotificationInput,
    ) -> Result<Notification, NotificationsServiceError> {
        let title = required_text(input.title)?;
        let message = required_text(input.message)?;

        let priority = match input.priority.as_deref() {
            None => Priority::default(),
            Some(p) => Priority::parse(p).ok_or(NotificationsServiceError::UnknownPriority)?,
        };
        let status = match input.status.as_deref() {
            None => NotificationStatus::Unread,
            Some(s) => {
                NotificationStatus::parse(s).ok_or(NotificationsServiceError::UnknownStatus)?
            }
        };

        let recipient_role = input
            .recipient_role
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| role::ADMIN.to_owned());
        let recipient_id = input
            .recipient_id
            .sanitize(recipient_role == role::CLIENT);

        let now = Utc::now();
        let notification = Notification {
            id: Uuid::new_v4(),
            title,
            message,
            icon: input.icon,
            priority,
            status,
            notification_type: input.notification_type,
            source_table: input.source_table,
            source_table_display_name: input.source_table_display_name,
            source_record_id: input.source_record_id,
            data: input.data,
            action_url: input.action_url,
            recipient_role: Some(recipient_role),
            recipient_id,
            created_at: now,
            updated_at: now,
            read_at: (status == NotificationStatus::Read).then_some(now),
        };

        self.repo.insert(&notification).await?;
        tracing::debug!(
            notification_id = %notification.id,
            recipient_role = ?notification.recipient_role,
            recipient_id = ?notification.recipient_id,
            "notification created"
        );
        Ok(notification)
    }
}

fn required_text(value: Option<String>) -> Result<String, NotificationsServiceError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(NotificationsServiceError::TitleAndMessageRequired)
}
