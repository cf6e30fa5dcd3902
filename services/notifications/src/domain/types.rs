use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default number of rows returned by the feed when the caller gives no limit.
pub const DEFAULT_FEED_LIMIT: u64 = 50;

/// Hard ceiling on a single feed request.
pub const MAX_FEED_LIMIT: u64 = 200;

/// Notification urgency, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Normal,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "urgent" => Some(Self::Urgent),
            "high" => Some(Self::High),
            "normal" => Some(Self::Normal),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Notification lifecycle status. Moves forward only:
/// unread → read → archived, with unread → archived also allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Unread,
    Read,
    Archived,
}

impl NotificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unread" => Some(Self::Unread),
            "read" => Some(Self::Read),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Unread => 0,
            Self::Read => 1,
            Self::Archived => 2,
        }
    }

    /// Whether moving from `self` to `next` keeps the lifecycle moving
    /// forward. Same-state writes are allowed (idempotent re-marking).
    pub fn allows_transition_to(self, next: Self) -> bool {
        self.rank() <= next.rank()
    }
}

/// A portal notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub icon: Option<String>,
    pub priority: Priority,
    pub status: NotificationStatus,
    pub notification_type: Option<String>,
    pub source_table: Option<String>,
    pub source_table_display_name: Option<String>,
    pub source_record_id: Option<String>,
    pub data: Option<serde_json::Value>,
    pub action_url: Option<String>,
    pub recipient_role: Option<String>,
    pub recipient_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// The client id carried in the `data` payload, if any.
    /// Accepts both JSON numbers and numeric strings — producers are not
    /// consistent about which they send.
    pub fn data_user_id(&self) -> Option<i64> {
        match self.data.as_ref()?.get("user_id")? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// Caller-supplied recipient id, parsed at the API boundary before any
/// targeting decision is made.
///
/// `recipient_id` must only ever hold an internal positive integer id.
/// Auth-provider identities (UUID-shaped strings) show up here when a
/// caller confuses the two id spaces; they are classified as `External`
/// and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientTarget {
    Numeric(i64),
    External(String),
    Absent,
}

impl RecipientTarget {
    pub fn parse(raw: Option<&serde_json::Value>) -> Self {
        let Some(raw) = raw else {
            return Self::Absent;
        };
        match raw {
            serde_json::Value::Null => Self::Absent,
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(id) => Self::Numeric(id),
                None => Self::External(n.to_string()),
            },
            serde_json::Value::String(s) => {
                if !s.contains('-') {
                    if let Ok(id) = s.trim().parse::<i64>() {
                        return Self::Numeric(id);
                    }
                }
                Self::External(s.clone())
            }
            other => Self::External(other.to_string()),
        }
    }

    /// Apply the targeting invariants and reduce to a storable id.
    ///
    /// In order: external (UUID-shaped or otherwise non-numeric) ids are
    /// discarded; client-targeted notifications never carry a recipient
    /// id (clients are addressed via `data.user_id` only); whatever
    /// remains must be a positive integer. Drops are logged at debug and
    /// never fail the request.
    pub fn sanitize(self, client_targeted: bool) -> Option<i64> {
        if let Self::External(raw) = &self {
            tracing::debug!(raw = %raw, "discarding non-numeric recipient id");
            return None;
        }
        if client_targeted {
            if matches!(self, Self::Numeric(_)) {
                tracing::debug!("discarding recipient id on client-targeted notification");
            }
            return None;
        }
        match self {
            Self::Numeric(id) if id > 0 => Some(id),
            Self::Numeric(id) => {
                tracing::debug!(id, "discarding non-positive recipient id");
                None
            }
            _ => None,
        }
    }
}
