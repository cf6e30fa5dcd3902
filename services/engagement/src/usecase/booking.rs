use chrono::{NaiveDate, NaiveTime, Utc};
use serde_json::json;
use uuid::Uuid;

use domus_domain::pagination::PageRequest;
use domus_domain::role;

use crate::domain::repository::{
    BookingRepository, NotificationPublisher, OutboundNotification,
};
use crate::domain::types::{
    Booking, BookingState, OperationalStatus, is_known_booking_status, validate_email,
};
use crate::error::EngagementServiceError;

// ── CreateBooking ────────────────────────────────────────────────────────────

pub struct CreateBookingInput {
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

pub struct CreateBookingUseCase<B, N>
where
    B: BookingRepository,
    N: NotificationPublisher,
{
    pub bookings: B,
    pub notifier: N,
}

impl<B, N> CreateBookingUseCase<B, N>
where
    B: BookingRepository,
    N: NotificationPublisher,
{
    pub async fn execute(
        &self,
        input: CreateBookingInput,
    ) -> Result<Booking, EngagementServiceError> {
        let appointment_date = parse_date(&input.appointment_date)?;
        let appointment_time = parse_time(&input.appointment_time)?;
        if appointment_date < Utc::now().date_naive() {
            return Err(EngagementServiceError::InvalidAppointment);
        }

        // Either an authenticated portal user or a walk-in with enough
        // contact data to reach back.
        if let Some(user_id) = input.user_id {
            if user_id <= 0 {
                return Err(EngagementServiceError::InvalidUserId);
            }
        } else {
            let has_name = input
                .client_name
                .as_deref()
                .is_some_and(|n| !n.trim().is_empty());
            let has_email = input
                .client_email
                .as_deref()
                .is_some_and(validate_email);
            if !has_name || !has_email {
                return Err(EngagementServiceError::MissingData);
            }
        }

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            property_id: input.property_id,
            property_title: input.property_title,
            user_id: input.user_id,
            client_name: input.client_name,
            client_email: input.client_email,
            client_phone: input.client_phone,
            appointment_date,
            appointment_time,
            message: input.message,
            state: BookingState::Pending,
            created_at: now,
            updated_at: now,
        };

        self.bookings.create(&booking).await?;
        publish_quietly(
            &self.notifier,
            stage_notification(
                &booking,
                role::CS,
                "New tour booking",
                "is awaiting customer-service approval",
                "booking_request",
            ),
        )
        .await;
        Ok(booking)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, EngagementServiceError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| EngagementServiceError::InvalidAppointment)
}

fn parse_time(raw: &str) -> Result<NaiveTime, EngagementServiceError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| EngagementServiceError::InvalidAppointment)
}

// ── GetBooking / ListBookings ────────────────────────────────────────────────

pub struct GetBookingUseCase<B: BookingRepository> {
    pub bookings: B,
}

impl<B: BookingRepository> GetBookingUseCase<B> {
    pub async fn execute(&self, id: Uuid) -> Result<Booking, EngagementServiceError> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or(EngagementServiceError::BookingNotFound)
    }
}

pub struct ListBookingsUseCase<B: BookingRepository> {
    pub bookings: B,
}

impl<B: BookingRepository> ListBookingsUseCase<B> {
    pub async fn execute(
        &self,
        status: Option<String>,
        page: PageRequest,
    ) -> Result<Vec<Booking>, EngagementServiceError> {
        if let Some(status) = status.as_deref() {
            if !is_known_booking_status(status) {
                return Err(EngagementServiceError::UnknownBookingStatus);
            }
        }
        self.bookings.list(status.as_deref(), page.clamped()).await
    }
}

// ── Approval stages ──────────────────────────────────────────────────────────

pub struct ApproveBookingCsUseCase<B, N>
where
    B: BookingRepository,
    N: NotificationPublisher,
{
    pub bookings: B,
    pub notifier: N,
}

impl<B, N> ApproveBookingCsUseCase<B, N>
where
    B: BookingRepository,
    N: NotificationPublisher,
{
    pub async fn execute(&self, id: Uuid) -> Result<Booking, EngagementServiceError> {
        let booking = find(&self.bookings, id).await?;
        let now = Utc::now();
        let next = booking.state.approve_cs(now)?;
        self.bookings.update_state(id, &next, now).await?;

        let updated = Booking {
            state: next,
            updated_at: now,
            ..booking
        };
        publish_quietly(
            &self.notifier,
            stage_notification(
                &updated,
                role::SALES,
                "Tour booking awaiting sales approval",
                "passed customer-service review",
                "booking_cs_approved",
            ),
        )
        .await;
        Ok(updated)
    }
}

pub struct ApproveBookingSalesUseCase<B, N>
where
    B: BookingRepository,
    N: NotificationPublisher,
{
    pub bookings: B,
    pub notifier: N,
}

impl<B, N> ApproveBookingSalesUseCase<B, N>
where
    B: BookingRepository,
    N: NotificationPublisher,
{
    pub async fn execute(&self, id: Uuid) -> Result<Booking, EngagementServiceError> {
        let booking = find(&self.bookings, id).await?;
        let now = Utc::now();
        // The CS-before-Sales gate lives in the state machine; a direct
        // API call cannot skip it.
        let next = booking.state.approve_sales(now)?;
        self.bookings.update_state(id, &next, now).await?;

        let updated = Booking {
            state: next,
            updated_at: now,
            ..booking
        };
        if let Some(n) =
            client_notification(&updated, "Tour approved", "was approved", "booking_approved")
        {
            publish_quietly(&self.notifier, n).await;
        }
        Ok(updated)
    }
}

// ── Rejection ────────────────────────────────────────────────────────────────

pub struct RejectBookingUseCase<B, N>
where
    B: BookingRepository,
    N: NotificationPublisher,
{
    pub bookings: B,
    pub notifier: N,
}

impl<B, N> RejectBookingUseCase<B, N>
where
    B: BookingRepository,
    N: NotificationPublisher,
{
    pub async fn execute(
        &self,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<Booking, EngagementServiceError> {
        let booking = find(&self.bookings, id).await?;
        let now = Utc::now();
        let next = booking.state.reject(reason.as_deref().unwrap_or(""))?;
        self.bookings.update_state(id, &next, now).await?;

        let updated = Booking {
            state: next,
            updated_at: now,
            ..booking
        };
        // The reason travels verbatim to the submitting client.
        if let Some(mut n) =
            client_notification(&updated, "Tour declined", "was declined", "booking_rejected")
        {
            if let Some(reason) = updated.state.rejection_reason() {
                n.message = format!("{}: {reason}", n.message);
            }
            publish_quietly(&self.notifier, n).await;
        }
        Ok(updated)
    }
}

// ── Operational status changes ───────────────────────────────────────────────

pub struct UpdateBookingStatusUseCase<B, N>
where
    B: BookingRepository,
    N: NotificationPublisher,
{
    pub bookings: B,
    pub notifier: N,
}

impl<B, N> UpdateBookingStatusUseCase<B, N>
where
    B: BookingRepository,
    N: NotificationPublisher,
{
    pub async fn execute(
        &self,
        id: Uuid,
        status: OperationalStatus,
    ) -> Result<Booking, EngagementServiceError> {
        let booking = find(&self.bookings, id).await?;
        let now = Utc::now();
        let next = match status {
            OperationalStatus::Confirmed => booking.state.confirm()?,
            OperationalStatus::Cancelled => booking.state.cancel()?,
            OperationalStatus::Completed => booking.state.complete()?,
            OperationalStatus::NoShow => booking.state.mark_no_show()?,
        };
        self.bookings.update_state(id, &next, now).await?;

        let updated = Booking {
            state: next,
            updated_at: now,
            ..booking
        };
        if status == OperationalStatus::Confirmed {
            if let Some(n) = client_notification(
                &updated,
                "Tour confirmed",
                "is confirmed",
                "booking_confirmed",
            ) {
                publish_quietly(&self.notifier, n).await;
            }
        }
        Ok(updated)
    }
}

// ── Fan-out helpers ──────────────────────────────────────────────────────────

async fn find<B: BookingRepository>(
    bookings: &B,
    id: Uuid,
) -> Result<Booking, EngagementServiceError> {
    bookings
        .find_by_id(id)
        .await?
        .ok_or(EngagementServiceError::BookingNotFound)
}

fn property_label(booking: &Booking) -> String {
    booking
        .property_title
        .clone()
        .unwrap_or_else(|| format!("property {}", booking.property_id))
}

/// Notification for the next approver role in the pipeline.
fn stage_notification(
    booking: &Booking,
    recipient_role: &str,
    title: &str,
    phrase: &str,
    notification_type: &str,
) -> OutboundNotification {
    OutboundNotification {
        title: title.to_owned(),
        message: format!(
            "A tour of {} on {} {phrase}",
            property_label(booking),
            booking.appointment_date
        ),
        notification_type: notification_type.to_owned(),
        recipient_role: recipient_role.to_owned(),
        data: Some(json!({
            "booking_id": booking.id,
            "property_id": booking.property_id,
        })),
        source_table: "bookings".to_owned(),
        source_record_id: booking.id.to_string(),
        action_url: None,
    }
}

/// Client-targeted notification: `client` role plus `data.user_id`,
/// never `recipient_id`. Walk-ins without a portal account get none.
fn client_notification(
    booking: &Booking,
    title: &str,
    phrase: &str,
    notification_type: &str,
) -> Option<OutboundNotification> {
    let user_id = booking.user_id?;
    Some(OutboundNotification {
        title: title.to_owned(),
        message: format!(
            "Your tour of {} on {} {phrase}",
            property_label(booking),
            booking.appointment_date
        ),
        notification_type: notification_type.to_owned(),
        recipient_role: role::CLIENT.to_owned(),
        data: Some(json!({
            "user_id": user_id,
            "booking_id": booking.id,
            "property_id": booking.property_id,
        })),
        source_table: "bookings".to_owned(),
        source_record_id: booking.id.to_string(),
        action_url: None,
    })
}

/// Fan-out is best-effort: a failed publish is logged, never bubbled into
/// the booking operation that triggered it.
async fn publish_quietly<N: NotificationPublisher>(
    notifier: &N,
    notification: OutboundNotification,
) {
    if let Err(e) = notifier.publish(&notification).await {
        tracing::warn!(error = %e, "failed to publish booking notification");
    }
}
