use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domus_auth_types::identity::IdentityHeaders;
use domus_domain::pagination::PageRequest;
use domus_domain::role;

use crate::domain::types::{Booking, OperationalStatus};
use crate::error::EngagementServiceError;
use crate::state::AppState;
use crate::usecase::booking::{
    ApproveBookingCsUseCase, ApproveBookingSalesUseCase, CreateBookingInput,
    CreateBookingUseCase, GetBookingUseCase, ListBookingsUseCase, RejectBookingUseCase,
    UpdateBookingStatusUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub property_id: String,
    pub property_title: Option<String>,
    pub user_id: Option<i64>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub appointment_date: chrono::NaiveDate,
    pub appointment_time: chrono::NaiveTime,
    pub message: Option<String>,
    pub status: &'static str,
    /// The approval stage the booking is waiting on, when not terminal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_stage: Option<&'static str>,
    #[serde(serialize_with = "domus_core::serde::to_rfc3339_ms_opt")]
    pub cs_approved_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "domus_core::serde::to_rfc3339_ms_opt")]
    pub sales_approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub rejection_reason: Option<String>,
    #[serde(serialize_with = "domus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "domus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id.to_string(),
            property_id: b.property_id.to_string(),
            property_title: b.property_title,
            user_id: b.user_id,
            client_name: b.client_name,
            client_email: b.client_email,
            client_phone: b.client_phone,
            appointment_date: b.appointment_date,
            appointment_time: b.appointment_time,
            message: b.message,
            status: b.state.status_name(),
            pending_stage: b.state.pending_stage(),
            cs_approved_at: b.state.cs_approved_at(),
            sales_approved_at: b.state.sales_approved_at(),
            rejection_reason: b.state.rejection_reason().map(str::to_owned),
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

// ── POST /bookings ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub property_id: Uuid,
    pub property_title: Option<String>,
    pub user_id: Option<i64>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub appointment_date: String,
    pub appointment_time: String,
    pub message: Option<String>,
}

pub async fn create_booking(
    State(state): State<AppState>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), EngagementServiceError> {
    let usecase = CreateBookingUseCase {
        bookings: state.booking_repo(),
        notifier: state.notifier(),
    };
    let booking = usecase
        .execute(CreateBookingInput {
            property_id: body.property_id,
            property_title: body.property_title,
            user_id: body.user_id,
            client_name: body.client_name,
            client_email: body.client_email,
            client_phone: body.client_phone,
            appointment_date: body.appointment_date,
            appointment_time: body.appointment_time,
            message: body.message,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

// ── GET /bookings ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BookingListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub status: Option<String>,
}

pub async fn list_bookings(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<BookingResponse>>, EngagementServiceError> {
    require_staff(&identity)?;
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let usecase = ListBookingsUseCase {
        bookings: state.booking_repo(),
    };
    let bookings = usecase.execute(query.status, page).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

// ── GET /bookings/{id} ───────────────────────────────────────────────────────

pub async fn get_booking(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, EngagementServiceError> {
    require_staff(&identity)?;
    let usecase = GetBookingUseCase {
        bookings: state.booking_repo(),
    };
    let booking = usecase.execute(id).await?;
    Ok(Json(booking.into()))
}

// ── PATCH /bookings/{id}/cs-approval ─────────────────────────────────────────

pub async fn approve_cs(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, EngagementServiceError> {
    require_stage(&identity, role::CS)?;
    let usecase = ApproveBookingCsUseCase {
        bookings: state.booking_repo(),
        notifier: state.notifier(),
    };
    let booking = usecase.execute(id).await?;
    Ok(Json(booking.into()))
}

// ── PATCH /bookings/{id}/sales-approval ──────────────────────────────────────

pub async fn approve_sales(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, EngagementServiceError> {
    require_stage(&identity, role::SALES)?;
    let usecase = ApproveBookingSalesUseCase {
        bookings: state.booking_repo(),
        notifier: state.notifier(),
    };
    let booking = usecase.execute(id).await?;
    Ok(Json(booking.into()))
}

// ── PATCH /bookings/{id}/rejection ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct RejectBookingRequest {
    pub reason: Option<String>,
}

pub async fn reject_booking(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectBookingRequest>,
) -> Result<Json<BookingResponse>, EngagementServiceError> {
    require_staff(&identity)?;
    let usecase = RejectBookingUseCase {
        bookings: state.booking_repo(),
        notifier: state.notifier(),
    };
    let booking = usecase.execute(id, body.reason).await?;
    Ok(Json(booking.into()))
}

// ── PATCH /bookings/{id}/status ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

pub async fn update_booking_status(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBookingStatusRequest>,
) -> Result<Json<BookingResponse>, EngagementServiceError> {
    require_staff(&identity)?;
    let status = OperationalStatus::parse(&body.status)
        .ok_or(EngagementServiceError::UnknownBookingStatus)?;
    let usecase = UpdateBookingStatusUseCase {
        bookings: state.booking_repo(),
        notifier: state.notifier(),
    };
    let booking = usecase.execute(id, status).await?;
    Ok(Json(booking.into()))
}

// ── Role gates ───────────────────────────────────────────────────────────────

fn require_staff(identity: &IdentityHeaders) -> Result<(), EngagementServiceError> {
    if !identity.is_staff() {
        return Err(EngagementServiceError::Forbidden);
    }
    Ok(())
}

fn require_stage(
    identity: &IdentityHeaders,
    stage: &str,
) -> Result<(), EngagementServiceError> {
    if !role::may_approve(&identity.role, stage) {
        return Err(EngagementServiceError::Forbidden);
    }
    Ok(())
}
