use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::types::TransitionError;

/// Engagement service error variants.
#[derive(Debug, thiserror::Error)]
pub enum EngagementServiceError {
    #[error("a valid email address is required")]
    InvalidEmail,
    #[error("OTP code must be 6 digits")]
    InvalidOtpFormat,
    #[error("invalid or expired code")]
    InvalidOtp,
    #[error("email has not been verified")]
    EmailNotVerified,
    #[error("missing data")]
    MissingData,
    #[error("user id must be a positive integer")]
    InvalidUserId,
    #[error("a valid future appointment date and time is required")]
    InvalidAppointment,
    #[error("a rejection reason is required")]
    RejectionReasonRequired,
    #[error("{0}")]
    InvalidTransition(String),
    #[error("unknown booking status")]
    UnknownBookingStatus,
    #[error("booking not found")]
    BookingNotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl EngagementServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidOtpFormat => "INVALID_OTP_FORMAT",
            Self::InvalidOtp => "INVALID_OTP",
            Self::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InvalidAppointment => "INVALID_APPOINTMENT",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::UnknownBookingStatus => "UNKNOWN_BOOKING_STATUS",
            Self::BookingNotFound => "BOOKING_NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<TransitionError> for EngagementServiceError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::MissingReason => Self::RejectionReasonRequired,
            TransitionError::InvalidFrom { .. } => Self::InvalidTransition(e.to_string()),
            TransitionError::Corrupt(detail) => {
                Self::Internal(anyhow::anyhow!("corrupt booking row: {detail}"))
            }
        }
    }
}

impl IntoResponse for EngagementServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidEmail
            | Self::InvalidOtpFormat
            | Self::MissingData
            | Self::InvalidUserId
            | Self::InvalidAppointment
            | Self::RejectionReasonRequired
            | Self::UnknownBookingStatus => StatusCode::BAD_REQUEST,
            Self::InvalidOtp | Self::EmailNotVerified => StatusCode::UNAUTHORIZED,
            Self::InvalidTransition(_) => StatusCode::CONFLICT,
            Self::BookingNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests; the anyhow chain is what makes a root cause traceable.
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
