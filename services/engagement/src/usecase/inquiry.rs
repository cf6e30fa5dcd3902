use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use domus_domain::pagination::PageRequest;
use domus_domain::role;

use crate::domain::repository::{
    InquiryRepository, NotificationPublisher, OtpChallengeRepository, OutboundNotification,
};
use crate::domain::types::{Inquiry, InquiryStatus, validate_email};
use crate::error::EngagementServiceError;

pub struct SubmitInquiryInput {
    pub property_id: Uuid,
    pub property_title: Option<String>,
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub is_authenticated: bool,
}

pub struct SubmitInquiryUseCase<I, O, N>
where
    I: InquiryRepository,
    O: OtpChallengeRepository,
    N: NotificationPublisher,
{
    pub inquiries: I,
    pub otps: O,
    pub notifier: N,
}

impl<I, O, N> SubmitInquiryUseCase<I, O, N>
where
    I: InquiryRepository,
    O: OtpChallengeRepository,
    N: NotificationPublisher,
{
    pub async fn execute(
        &self,
        input: SubmitInquiryInput,
    ) -> Result<Inquiry, EngagementServiceError> {
        let email = input.email.trim().to_ascii_lowercase();
        if !validate_email(&email) {
            return Err(EngagementServiceError::InvalidEmail);
        }
        let first_name = input.first_name.trim().to_owned();
        let last_name = input.last_name.trim().to_owned();
        let message = input.message.trim().to_owned();
        if first_name.is_empty() || last_name.is_empty() || message.is_empty() {
            return Err(EngagementServiceError::MissingData);
        }

        if input.is_authenticated {
            // Identity already established by the auth provider.
            match input.user_id {
                Some(user_id) if user_id > 0 => {}
                _ => return Err(EngagementServiceError::InvalidUserId),
            }
        } else {
            // Anonymous visitors must have proven ownership of the email;
            // accepting the inquiry spends the challenge, so a second
            // submission needs a fresh code.
            let now = Utc::now();
            let challenge = self
                .otps
                .find_latest(&email)
                .await?
                .filter(|c| c.is_verified());
            let Some(challenge) = challenge else {
                return Err(EngagementServiceError::EmailNotVerified);
            };
            self.otps.mark_consumed(challenge.id, now).await?;
        }

        let inquiry = Inquiry {
            id: Uuid::new_v4(),
            property_id: input.property_id,
            property_title: input.property_title,
            user_id: input.user_id,
            first_name,
            last_name,
            email,
            phone: input.phone,
            message,
            is_authenticated: input.is_authenticated,
            status: InquiryStatus::New,
            created_at: Utc::now(),
        };

        self.inquiries.create(&inquiry).await?;
        publish_quietly(&self.notifier, &inquiry).await;
        Ok(inquiry)
    }
}

pub struct ListInquiriesUseCase<I: InquiryRepository> {
    pub inquiries: I,
}

impl<I: InquiryRepository> ListInquiriesUseCase<I> {
    pub async fn execute(
        &self,
        page: PageRequest,
    ) -> Result<Vec<Inquiry>, EngagementServiceError> {
        self.inquiries.list(page.clamped()).await
    }
}

async fn publish_quietly<N: NotificationPublisher>(notifier: &N, inquiry: &Inquiry) {
    let label = inquiry
        .property_title
        .clone()
        .unwrap_or_else(|| format!("property {}", inquiry.property_id));
    let notification = OutboundNotification {
        title: "New property inquiry".to_owned(),
        message: format!(
            "{} {} asked about {label}",
            inquiry.first_name, inquiry.last_name
        ),
        notification_type: "inquiry".to_owned(),
        recipient_role: role::ADMIN.to_owned(),
        data: Some(json!({
            "inquiry_id": inquiry.id,
            "property_id": inquiry.property_id,
        })),
        source_table: "inquiries".to_owned(),
        source_record_id: inquiry.id.to_string(),
        action_url: None,
    };
    if let Err(e) = notifier.publish(&notification).await {
        tracing::warn!(error = %e, "failed to publish inquiry notification");
    }
}
