use anyhow::Context as _;
use serde::Serialize;

use crate::domain::repository::{NotificationPublisher, OutboundNotification};
use crate::error::EngagementServiceError;

/// Publishes workflow notifications to the notifications service over
/// its JSON API.
#[derive(Clone)]
pub struct HttpNotificationPublisher {
    pub client: reqwest::Client,
    pub base_url: String,
}

#[derive(Debug, Serialize)]
struct CreateNotificationBody<'a> {
    title: &'a str,
    message: &'a str,
    notification_type: &'a str,
    recipient_role: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a serde_json::Value>,
    source_table: &'a str,
    source_record_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    action_url: Option<&'a str>,
}

impl NotificationPublisher for HttpNotificationPublisher {
    async fn publish(
        &self,
        notification: &OutboundNotification,
    ) -> Result<(), EngagementServiceError> {
        let body = CreateNotificationBody {
            title: &notification.title,
            message: &notification.message,
            notification_type: &notification.notification_type,
            recipient_role: &notification.recipient_role,
            data: notification.data.as_ref(),
            source_table: &notification.source_table,
            source_record_id: &notification.source_record_id,
            action_url: notification.action_url.as_deref(),
        };

        let url = format!("{}/notifications", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("publish notification")?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(EngagementServiceError::Internal(anyhow::anyhow!(
                "notifications service returned {status}"
            )));
        }
        Ok(())
    }
}
