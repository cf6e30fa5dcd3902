use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use domus_notifications::domain::repository::{NotificationChange, NotificationRepository};
use domus_notifications::domain::types::{Notification, NotificationStatus, Priority};
use domus_notifications::domain::visibility::FeedQuery;
use domus_notifications::error::NotificationsServiceError;

// ── MockNotificationRepo ─────────────────────────────────────────────────────

/// In-memory store applying the same reference semantics the SQL layer
/// implements: `FeedQuery::admits` row filtering, newest-first ordering,
/// limit truncation.
pub struct MockNotificationRepo {
    pub rows: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotificationRepo {
    pub fn new(rows: Vec<Notification>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the internal rows for post-execution inspection.
    pub fn rows_handle(&self) -> Arc<Mutex<Vec<Notification>>> {
        Arc::clone(&self.rows)
    }
}

impl NotificationRepository for MockNotificationRepo {
    async fn list(
        &self,
        query: &FeedQuery,
    ) -> Result<Vec<Notification>, NotificationsServiceError> {
        let mut admitted: Vec<Notification> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| query.admits(n))
            .cloned()
            .collect();
        admitted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        admitted.truncate(query.limit as usize);
        Ok(admitted)
    }

    async fn insert(
        &self,
        notification: &Notification,
    ) -> Result<(), NotificationsServiceError> {
        self.rows.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Notification>, NotificationsServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        change: &NotificationChange,
    ) -> Result<Option<Notification>, NotificationsServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        if let Some(status) = change.status {
            row.status = status;
        }
        if let Some(read_at) = change.read_at {
            row.read_at = Some(read_at);
        }
        row.updated_at = change.updated_at;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, NotificationsServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|n| n.id != id);
        Ok(rows.len() < before)
    }

    async fn delete_all(&self) -> Result<u64, NotificationsServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn notification(
    recipient_role: Option<&str>,
    recipient_id: Option<i64>,
    data: Option<serde_json::Value>,
) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        title: "Test".to_owned(),
        message: "Hi".to_owned(),
        icon: None,
        priority: Priority::Normal,
        status: NotificationStatus::Unread,
        notification_type: None,
        source_table: None,
        source_table_display_name: None,
        source_record_id: None,
        data,
        action_url: None,
        recipient_role: recipient_role.map(str::to_owned),
        recipient_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        read_at: None,
    }
}

/// Same as `notification`, but created `minutes_ago` in the past so
/// ordering assertions have distinct timestamps.
pub fn notification_at(
    recipient_role: Option<&str>,
    minutes_ago: i64,
) -> Notification {
    let at = Utc::now() - Duration::minutes(minutes_ago);
    let mut n = notification(recipient_role, None, None);
    n.created_at = at;
    n.updated_at = at;
    n
}

pub fn created_times(rows: &[Notification]) -> Vec<DateTime<Utc>> {
    rows.iter().map(|n| n.created_at).collect()
}
