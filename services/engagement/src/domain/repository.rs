#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use domus_domain::pagination::PageRequest;

use crate::domain::types::{Booking, BookingState, Inquiry, OtpChallenge};
use crate::error::EngagementServiceError;

/// Repository for OTP challenges.
pub trait OtpChallengeRepository: Send + Sync {
    /// The latest unconsumed challenge for an email, if any.
    async fn find_latest(
        &self,
        email: &str,
    ) -> Result<Option<OtpChallenge>, EngagementServiceError>;

    /// Insert `challenge`, removing any prior unconsumed challenge for
    /// the same email (one live challenge per address, atomically).
    async fn replace(&self, challenge: &OtpChallenge) -> Result<(), EngagementServiceError>;

    /// Stamp `verified_at`.
    async fn mark_verified(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), EngagementServiceError>;

    /// Stamp `consumed_at`, spending the challenge.
    async fn mark_consumed(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), EngagementServiceError>;
}

/// Repository for tour bookings.
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<(), EngagementServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, EngagementServiceError>;

    /// Persist a state transition. The workflow precondition (no Sales
    /// approval without CS approval) is already type-enforced upstream.
    async fn update_state(
        &self,
        id: Uuid,
        state: &BookingState,
        updated_at: DateTime<Utc>,
    ) -> Result<(), EngagementServiceError>;

    /// Bookings newest first, optionally filtered by status name.
    async fn list(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Booking>, EngagementServiceError>;
}

/// Repository for inquiries.
pub trait InquiryRepository: Send + Sync {
    async fn create(&self, inquiry: &Inquiry) -> Result<(), EngagementServiceError>;

    /// Inquiries newest first.
    async fn list(&self, page: PageRequest) -> Result<Vec<Inquiry>, EngagementServiceError>;
}

/// Outbound delivery channel for OTP codes (external mail service).
pub trait OtpMailer: Send + Sync {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        purpose: &str,
    ) -> Result<(), EngagementServiceError>;
}

/// A notification handed to the notifications service.
#[derive(Debug, Clone)]
pub struct OutboundNotification {
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub recipient_role: String,
    pub data: Option<serde_json::Value>,
    pub source_table: String,
    pub source_record_id: String,
    pub action_url: Option<String>,
}

/// Port for publishing notifications to the notifications service.
pub trait NotificationPublisher: Send + Sync {
    async fn publish(
        &self,
        notification: &OutboundNotification,
    ) -> Result<(), EngagementServiceError>;
}
