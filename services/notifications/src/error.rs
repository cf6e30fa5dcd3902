use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Notifications service error variants.
#[derive(Debug, thiserror::Error)]
pub enum NotificationsServiceError {
    #[error("Title and message are required")]
    TitleAndMessageRequired,
    #[error("Notification ID is required")]
    NotificationIdRequired,
    #[error("userId must be a positive integer")]
    InvalidUserIdFilter,
    #[error("unknown status")]
    UnknownStatus,
    #[error("unknown priority")]
    UnknownPriority,
    #[error("notification status cannot move backwards")]
    InvalidStatusTransition,
    #[error("notification not found")]
    NotificationNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl NotificationsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TitleAndMessageRequired => "TITLE_AND_MESSAGE_REQUIRED",
            Self::NotificationIdRequired => "NOTIFICATION_ID_REQUIRED",
            Self::InvalidUserIdFilter => "INVALID_USER_ID_FILTER",
            Self::UnknownStatus => "UNKNOWN_STATUS",
            Self::UnknownPriority => "UNKNOWN_PRIORITY",
            Self::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            Self::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for NotificationsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::TitleAndMessageRequired
            | Self::NotificationIdRequired
            | Self::InvalidUserIdFilter
            | Self::UnknownStatus
            | Self::UnknownPriority => StatusCode::BAD_REQUEST,
            Self::InvalidStatusTransition => StatusCode::CONFLICT,
            Self::NotificationNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors; the anyhow chain on
        // internal errors is what makes a root cause traceable.
        let body = match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
                serde_json::json!({
                    "success": false,
                    "kind": self.kind(),
                    "error": self.to_string(),
                    "details": format!("{e:#}"),
                })
            }
            _ => serde_json::json!({
                "success": false,
                "kind": self.kind(),
                "error": self.to_string(),
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}
