use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::EngagementServiceError;
use crate::state::AppState;
use crate::usecase::otp::{RequestOtpInput, RequestOtpUseCase, VerifyOtpInput, VerifyOtpUseCase};

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

// ── POST /otp/send ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
    #[serde(default = "default_purpose")]
    pub purpose: String,
}

fn default_purpose() -> String {
    "inquiry verification".to_owned()
}

pub async fn send_otp(
    State(state): State<AppState>,
    Json(body): Json<SendOtpRequest>,
) -> Result<Json<MessageResponse>, EngagementServiceError> {
    let usecase = RequestOtpUseCase {
        otps: state.otp_repo(),
        mailer: state.mailer(),
    };
    usecase
        .execute(RequestOtpInput {
            email: body.email,
            purpose: body.purpose,
        })
        .await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "verification code sent",
    }))
}

// ── POST /otp/verify ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp_code: String,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<Json<MessageResponse>, EngagementServiceError> {
    let usecase = VerifyOtpUseCase {
        otps: state.otp_repo(),
    };
    usecase
        .execute(VerifyOtpInput {
            email: body.email,
            code: body.otp_code,
        })
        .await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "email verified",
    }))
}
