use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use domus_domain::pagination::PageRequest;

use domus_engagement::domain::repository::{
    BookingRepository, InquiryRepository, NotificationPublisher, OtpChallengeRepository,
    OtpMailer, OutboundNotification,
};
use domus_engagement::domain::types::{Booking, BookingState, Inquiry, OtpChallenge};
use domus_engagement::error::EngagementServiceError;

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

pub struct MockOtpRepo {
    pub challenges: Arc<Mutex<Vec<OtpChallenge>>>,
}

impl MockOtpRepo {
    pub fn new(challenges: Vec<OtpChallenge>) -> Self {
        Self {
            challenges: Arc::new(Mutex::new(challenges)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn challenges_handle(&self) -> Arc<Mutex<Vec<OtpChallenge>>> {
        Arc::clone(&self.challenges)
    }
}

impl OtpChallengeRepository for MockOtpRepo {
    async fn find_latest(
        &self,
        email: &str,
    ) -> Result<Option<OtpChallenge>, EngagementServiceError> {
        Ok(self
            .challenges
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.email == email && c.consumed_at.is_none())
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn replace(&self, challenge: &OtpChallenge) -> Result<(), EngagementServiceError> {
        let mut challenges = self.challenges.lock().unwrap();
        challenges.retain(|c| c.email != challenge.email || c.consumed_at.is_some());
        challenges.push(challenge.clone());
        Ok(())
    }

    async fn mark_verified(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), EngagementServiceError> {
        let mut challenges = self.challenges.lock().unwrap();
        if let Some(c) = challenges.iter_mut().find(|c| c.id == id) {
            c.verified_at = Some(at);
        }
        Ok(())
    }

    async fn mark_consumed(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), EngagementServiceError> {
        let mut challenges = self.challenges.lock().unwrap();
        if let Some(c) = challenges.iter_mut().find(|c| c.id == id) {
            c.consumed_at = Some(at);
        }
        Ok(())
    }
}

// ── MockBookingRepo ──────────────────────────────────────────────────────────

pub struct MockBookingRepo {
    pub bookings: Arc<Mutex<Vec<Booking>>>,
}

impl MockBookingRepo {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: Arc::new(Mutex::new(bookings)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn bookings_handle(&self) -> Arc<Mutex<Vec<Booking>>> {
        Arc::clone(&self.bookings)
    }
}

impl BookingRepository for MockBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<(), EngagementServiceError> {
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, EngagementServiceError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn update_state(
        &self,
        id: Uuid,
        state: &BookingState,
        updated_at: DateTime<Utc>,
    ) -> Result<(), EngagementServiceError> {
        let mut bookings = self.bookings.lock().unwrap();
        if let Some(b) = bookings.iter_mut().find(|b| b.id == id) {
            b.state = state.clone();
            b.updated_at = updated_at;
        }
        Ok(())
    }

    async fn list(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Booking>, EngagementServiceError> {
        let mut items: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| status.is_none_or(|s| b.state.status_name() == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect())
    }
}

// ── MockInquiryRepo ──────────────────────────────────────────────────────────

pub struct MockInquiryRepo {
    pub inquiries: Arc<Mutex<Vec<Inquiry>>>,
}

impl MockInquiryRepo {
    pub fn empty() -> Self {
        Self {
            inquiries: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn inquiries_handle(&self) -> Arc<Mutex<Vec<Inquiry>>> {
        Arc::clone(&self.inquiries)
    }
}

impl InquiryRepository for MockInquiryRepo {
    async fn create(&self, inquiry: &Inquiry) -> Result<(), EngagementServiceError> {
        self.inquiries.lock().unwrap().push(inquiry.clone());
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Inquiry>, EngagementServiceError> {
        let mut items: Vec<Inquiry> = self.inquiries.lock().unwrap().clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect())
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

/// Records every send as (email, code, purpose).
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl OtpMailer for MockMailer {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        purpose: &str,
    ) -> Result<(), EngagementServiceError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_owned(), code.to_owned(), purpose.to_owned()));
        Ok(())
    }
}

// ── MockPublisher ────────────────────────────────────────────────────────────

/// Records every published notification; can be told to fail to check
/// that fan-out stays best-effort.
pub struct MockPublisher {
    pub published: Arc<Mutex<Vec<OutboundNotification>>>,
    pub fail: bool,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            published: Arc::new(Mutex::new(vec![])),
            fail: true,
        }
    }

    pub fn published_handle(&self) -> Arc<Mutex<Vec<OutboundNotification>>> {
        Arc::clone(&self.published)
    }
}

impl NotificationPublisher for MockPublisher {
    async fn publish(
        &self,
        notification: &OutboundNotification,
    ) -> Result<(), EngagementServiceError> {
        if self.fail {
            return Err(EngagementServiceError::Internal(anyhow::anyhow!(
                "publisher down"
            )));
        }
        self.published.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn verified_challenge(email: &str) -> OtpChallenge {
    let now = Utc::now();
    let mut challenge = OtpChallenge::issue(
        email.to_owned(),
        "inquiry verification".to_owned(),
        "123456".to_owned(),
        now,
    );
    challenge.verified_at = Some(now);
    challenge
}

pub fn pending_booking(user_id: Option<i64>) -> Booking {
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        property_id: Uuid::new_v4(),
        property_title: Some("Lakeside Villa".to_owned()),
        user_id,
        client_name: Some("Alex Doe".to_owned()),
        client_email: Some("alex@example.com".to_owned()),
        client_phone: None,
        appointment_date: now.date_naive() + chrono::Duration::days(7),
        appointment_time: chrono::NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        message: None,
        state: BookingState::Pending,
        created_at: now,
        updated_at: now,
    }
}
