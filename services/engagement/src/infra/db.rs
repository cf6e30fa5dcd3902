use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use domus_domain::pagination::PageRequest;
use domus_engagement_schema::{bookings, inquiries, otp_challenges};

use crate::domain::repository::{BookingRepository, InquiryRepository, OtpChallengeRepository};
use crate::domain::types::{Booking, BookingState, Inquiry, InquiryStatus, OtpChallenge};
use crate::error::EngagementServiceError;

// ── OTP challenge repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpChallengeRepository {
    pub db: DatabaseConnection,
}

impl OtpChallengeRepository for DbOtpChallengeRepository {
    async fn find_latest(
        &self,
        email: &str,
    ) -> Result<Option<OtpChallenge>, EngagementServiceError> {
        let model = otp_challenges::Entity::find()
            .filter(otp_challenges::Column::Email.eq(email))
            .filter(otp_challenges::Column::ConsumedAt.is_null())
            .order_by_desc(otp_challenges::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest otp challenge")?;
        Ok(model.map(challenge_from_model))
    }

    async fn replace(&self, challenge: &OtpChallenge) -> Result<(), EngagementServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let challenge = challenge.clone();
                Box::pin(async move {
                    delete_unconsumed(txn, &challenge.email).await?;
                    insert_challenge(txn, &challenge).await?;
                    Ok(())
                })
            })
            .await
            .context("replace otp challenge")?;
        Ok(())
    }

    async fn mark_verified(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), EngagementServiceError> {
        otp_challenges::ActiveModel {
            id: Set(id),
            verified_at: Set(Some(at)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark otp challenge verified")?;
        Ok(())
    }

    async fn mark_consumed(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), EngagementServiceError> {
        otp_challenges::ActiveModel {
            id: Set(id),
            consumed_at: Set(Some(at)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark otp challenge consumed")?;
        Ok(())
    }
}

async fn delete_unconsumed(txn: &DatabaseTransaction, email: &str) -> Result<(), sea_orm::DbErr> {
    otp_challenges::Entity::delete_many()
        .filter(otp_challenges::Column::Email.eq(email))
        .filter(otp_challenges::Column::ConsumedAt.is_null())
        .exec(txn)
        .await?;
    Ok(())
}

async fn insert_challenge(
    txn: &DatabaseTransaction,
    challenge: &OtpChallenge,
) -> Result<(), sea_orm::DbErr> {
    otp_challenges::ActiveModel {
        id: Set(challenge.id),
        email: Set(challenge.email.clone()),
        code: Set(challenge.code.clone()),
        purpose: Set(challenge.purpose.clone()),
        verified_at: Set(challenge.verified_at),
        consumed_at: Set(challenge.consumed_at),
        expires_at: Set(challenge.expires_at),
        created_at: Set(challenge.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn challenge_from_model(model: otp_challenges::Model) -> OtpChallenge {
    OtpChallenge {
        id: model.id,
        email: model.email,
        code: model.code,
        purpose: model.purpose,
        verified_at: model.verified_at,
        consumed_at: model.consumed_at,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

// ── Booking repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookingRepository {
    pub db: DatabaseConnection,
}

impl BookingRepository for DbBookingRepository {
    async fn create(&self, booking: &Booking) -> Result<(), EngagementServiceError> {
        let (status, cs_at, sales_at, reason) = booking.state.to_parts();
        bookings::ActiveModel {
            id: Set(booking.id),
            property_id: Set(booking.property_id),
            property_title: Set(booking.property_title.clone()),
            user_id: Set(booking.user_id),
            client_name: Set(booking.client_name.clone()),
            client_email: Set(booking.client_email.clone()),
            client_phone: Set(booking.client_phone.clone()),
            appointment_date: Set(booking.appointment_date),
            appointment_time: Set(booking.appointment_time),
            message: Set(booking.message.clone()),
            status: Set(status.to_owned()),
            cs_approved_at: Set(cs_at),
            sales_approved_at: Set(sales_at),
            rejection_reason: Set(reason),
            created_at: Set(booking.created_at),
            updated_at: Set(booking.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create booking")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, EngagementServiceError> {
        let model = bookings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find booking by id")?;
        model.map(booking_from_model).transpose()
    }

    async fn update_state(
        &self,
        id: Uuid,
        state: &BookingState,
        updated_at: DateTime<Utc>,
    ) -> Result<(), EngagementServiceError> {
        let (status, cs_at, sales_at, reason) = state.to_parts();
        bookings::ActiveModel {
            id: Set(id),
            status: Set(status.to_owned()),
            cs_approved_at: Set(cs_at),
            sales_approved_at: Set(sales_at),
            rejection_reason: Set(reason),
            updated_at: Set(updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update booking state")?;
        Ok(())
    }

    async fn list(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Booking>, EngagementServiceError> {
        let mut query = bookings::Entity::find();
        if let Some(status) = status {
            query = query.filter(bookings::Column::Status.eq(status));
        }
        let models = query
            .order_by_desc(bookings::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list bookings")?;
        models.into_iter().map(booking_from_model).collect()
    }
}

fn booking_from_model(model: bookings::Model) -> Result<Booking, EngagementServiceError> {
    let state = BookingState::from_parts(
        &model.status,
        model.cs_approved_at,
        model.sales_approved_at,
        model.rejection_reason,
    )?;
    Ok(Booking {
        id: model.id,
        property_id: model.property_id,
        property_title: model.property_title,
        user_id: model.user_id,
        client_name: model.client_name,
        client_email: model.client_email,
        client_phone: model.client_phone,
        appointment_date: model.appointment_date,
        appointment_time: model.appointment_time,
        message: model.message,
        state,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Inquiry repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInquiryRepository {
    pub db: DatabaseConnection,
}

impl InquiryRepository for DbInquiryRepository {
    async fn create(&self, inquiry: &Inquiry) -> Result<(), EngagementServiceError> {
        inquiries::ActiveModel {
            id: Set(inquiry.id),
            property_id: Set(inquiry.property_id),
            property_title: Set(inquiry.property_title.clone()),
            user_id: Set(inquiry.user_id),
            first_name: Set(inquiry.first_name.clone()),
            last_name: Set(inquiry.last_name.clone()),
            email: Set(inquiry.email.clone()),
            phone: Set(inquiry.phone.clone()),
            message: Set(inquiry.message.clone()),
            is_authenticated: Set(inquiry.is_authenticated),
            status: Set(inquiry.status.as_str().to_owned()),
            created_at: Set(inquiry.created_at),
        }
        .insert(&self.db)
        .await
        .context("create inquiry")?;
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Inquiry>, EngagementServiceError> {
        let models = inquiries::Entity::find()
            .order_by_desc(inquiries::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list inquiries")?;
        Ok(models.into_iter().map(inquiry_from_model).collect())
    }
}

fn inquiry_from_model(model: inquiries::Model) -> Inquiry {
    Inquiry {
        id: model.id,
        property_id: model.property_id,
        property_title: model.property_title,
        user_id: model.user_id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        phone: model.phone,
        message: model.message,
        is_authenticated: model.is_authenticated,
        status: InquiryStatus::parse(&model.status).unwrap_or(InquiryStatus::New),
        created_at: model.created_at,
    }
}
