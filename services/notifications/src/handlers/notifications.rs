use axum::{Json, extract::Query, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Notification, RecipientTarget};
use crate::error::NotificationsServiceError;
use crate::state::AppState;
use crate::usecase::create::{CreateNotificationInput, CreateNotificationUseCase};
use crate::usecase::delete::{
    DeleteNotificationsInput, DeleteNotificationsUseCase, DeleteOutcome,
};
use crate::usecase::list::{ListNotificationsInput, ListNotificationsUseCase};
use crate::usecase::update::{UpdateNotificationInput, UpdateNotificationUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub title: String,
    pub message: String,
    pub icon: Option<String>,
    pub priority: String,
    pub status: String,
    pub notification_type: Option<String>,
    pub source_table: Option<String>,
    pub source_table_display_name: Option<String>,
    pub source_record_id: Option<String>,
    pub data: Option<serde_json::Value>,
    pub action_url: Option<String>,
    pub recipient_role: Option<String>,
    pub recipient_id: Option<i64>,
    #[serde(serialize_with = "domus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "domus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "domus_core::serde::to_rfc3339_ms_opt")]
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id.to_string(),
            title: n.title,
            message: n.message,
            icon: n.icon,
            priority: n.priority.as_str().to_owned(),
            status: n.status.as_str().to_owned(),
            notification_type: n.notification_type,
            source_table: n.source_table,
            source_table_display_name: n.source_table_display_name,
            source_record_id: n.source_record_id,
            data: n.data,
            action_url: n.action_url,
            recipient_role: n.recipient_role,
            recipient_id: n.recipient_id,
            created_at: n.created_at,
            updated_at: n.updated_at,
            read_at: n.read_at,
        }
    }
}

#[derive(Serialize)]
pub struct FeedResponse {
    pub success: bool,
    pub count: usize,
    #[serde(rename = "unreadCount")]
    pub unread_count: usize,
    pub notifications: Vec<NotificationResponse>,
}

// ── GET /notifications ───────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct FeedQueryParams {
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "clientOnly")]
    pub client_only: Option<bool>,
}

pub async fn list_notifications(
    State(state): State<AppState>,
    Query(params): Query<FeedQueryParams>,
) -> Result<Json<FeedResponse>, NotificationsServiceError> {
    let user_id = parse_user_id(params.user_id.as_deref())?;
    let usecase = ListNotificationsUseCase {
        repo: state.notification_repo(),
    };
    let feed = usecase
        .execute(ListNotificationsInput {
            role: params.role.filter(|r| !r.is_empty()),
            user_id,
            client_only: params.client_only.unwrap_or(false),
            status: params.status.filter(|s| !s.is_empty()),
            priority: params.priority.filter(|p| !p.is_empty()),
            limit: params.limit,
        })
        .await?;

    Ok(Json(FeedResponse {
        success: true,
        count: feed.count,
        unread_count: feed.unread_count,
        notifications: feed
            .notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    }))
}

/// `userId` is an internal positive integer id. Anything else (including a
/// UUID-shaped auth identity) is a caller error, not a filter to guess at.
fn parse_user_id(raw: Option<&str>) -> Result<Option<i64>, NotificationsServiceError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Some)
            .ok_or(NotificationsServiceError::InvalidUserIdFilter),
    }
}

// ── POST /notifications ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateNotificationRequest {
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
    /// Untyped on purpose: callers send integers, numeric strings, and —
    /// mistakenly — auth-provider UUIDs. Classified via `RecipientTarget`.
    pub recipient_id: Option<serde_json::Value>,
    pub data: Option<serde_json::Value>,
    pub action_url: Option<String>,
}

pub async fn create_notification(
    State(state): State<AppState>,
    Json(body): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<NotificationResponse>), NotificationsServiceError> {
    let usecase = CreateNotificationUseCase {
        repo: state.notification_repo(),
    };
    let created = usecase
        .execute(CreateNotificationInput {
            title: body.title,
            message: body.message,
            icon: body.icon,
            priority: body.priority,
            status: body.status,
            notification_type: body.notification_type,
            source_table: body.source_table,
            source_table_display_name: body.source_table_display_name,
            source_record_id: body.source_record_id,
            recipient_role: body.recipient_role,
            recipient_id: RecipientTarget::parse(body.recipient_id.as_ref()),
            data: body.data,
            action_url: body.action_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

// ── PUT /notifications ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateNotificationRequest {
    pub id: Option<Uuid>,
    pub status: Option<String>,
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub async fn update_notification(
    State(state): State<AppState>,
    Json(body): Json<UpdateNotificationRequest>,
) -> Result<Json<NotificationResponse>, NotificationsServiceError> {
    let usecase = UpdateNotificationUseCase {
        repo: state.notification_repo(),
    };
    let updated = usecase
        .execute(UpdateNotificationInput {
            id: body.id,
            status: body.status,
            read_at: body.read_at,
        })
        .await?;
    Ok(Json(updated.into()))
}

// ── DELETE /notifications ────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct DeleteQueryParams {
    pub id: Option<Uuid>,
    #[serde(rename = "clearAll")]
    pub clear_all: Option<bool>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

pub async fn delete_notifications(
    State(state): State<AppState>,
    Query(params): Query<DeleteQueryParams>,
) -> Result<Json<DeleteResponse>, NotificationsServiceError> {
    let usecase = DeleteNotificationsUseCase {
        repo: state.notification_repo(),
    };
    let outcome = usecase
        .execute(DeleteNotificationsInput {
            id: params.id,
            clear_all: params.clear_all.unwrap_or(false),
        })
        .await?;

    let message = match outcome {
        DeleteOutcome::Deleted => "notification deleted".to_owned(),
        DeleteOutcome::Cleared(removed) => format!("cleared {removed} notifications"),
    };
    Ok(Json(DeleteResponse {
        success: true,
        message,
    }))
}
