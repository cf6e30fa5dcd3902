use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domus_auth_types::identity::IdentityHeaders;
use domus_domain::pagination::PageRequest;

use crate::domain::types::Inquiry;
use crate::error::EngagementServiceError;
use crate::state::AppState;
use crate::usecase::inquiry::{
    ListInquiriesUseCase, SubmitInquiryInput, SubmitInquiryUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct InquiryResponse {
    pub id: String,
    pub property_id: String,
    pub property_title: Option<String>,
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub is_authenticated: bool,
    pub status: &'static str,
    #[serde(serialize_with = "domus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Inquiry> for InquiryResponse {
    fn from(i: Inquiry) -> Self {
        Self {
            id: i.id.to_string(),
            property_id: i.property_id.to_string(),
            property_title: i.property_title,
            user_id: i.user_id,
            first_name: i.first_name,
            last_name: i.last_name,
            email: i.email,
            phone: i.phone,
            message: i.message,
            is_authenticated: i.is_authenticated,
            status: i.status.as_str(),
            created_at: i.created_at,
        }
    }
}

// ── POST /inquiries ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitInquiryRequest {
    pub property_id: Uuid,
    pub property_title: Option<String>,
    pub user_id: Option<i64>,
    pub client_firstname: String,
    pub client_lastname: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub message: String,
    #[serde(default)]
    pub is_authenticated: bool,
}

pub async fn submit_inquiry(
    State(state): State<AppState>,
    Json(body): Json<SubmitInquiryRequest>,
) -> Result<(StatusCode, Json<InquiryResponse>), EngagementServiceError> {
    let usecase = SubmitInquiryUseCase {
        inquiries: state.inquiry_repo(),
        otps: state.otp_repo(),
        notifier: state.notifier(),
    };
    let inquiry = usecase
        .execute(SubmitInquiryInput {
            property_id: body.property_id,
            property_title: body.property_title,
            user_id: body.user_id,
            first_name: body.client_firstname,
            last_name: body.client_lastname,
            email: body.client_email,
            phone: body.client_phone,
            message: body.message,
            is_authenticated: body.is_authenticated,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(inquiry.into())))
}

// ── GET /inquiries ───────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct InquiryListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_inquiries(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<InquiryListQuery>,
) -> Result<Json<Vec<InquiryResponse>>, EngagementServiceError> {
    if !identity.is_staff() {
        return Err(EngagementServiceError::Forbidden);
    }
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let usecase = ListInquiriesUseCase {
        inquiries: state.inquiry_repo(),
    };
    let inquiries = usecase.execute(page).await?;
    Ok(Json(inquiries.into_iter().map(InquiryResponse::from).collect()))
}
