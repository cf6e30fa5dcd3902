use sea_orm::DatabaseConnection;

use crate::infra::db::{DbBookingRepository, DbInquiryRepository, DbOtpChallengeRepository};
use crate::infra::mailer::HttpMailer;
use crate::infra::notify::HttpNotificationPublisher;

/// Shared application state passed to every handler via axum `State`.
/// All external handles (datastore, outbound HTTP) are injected once at
/// startup; handlers obtain ports from it rather than reaching for any
/// global.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub http: reqwest::Client,
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,
    pub notifications_url: String,
}

impl AppState {
    pub fn otp_repo(&self) -> DbOtpChallengeRepository {
        DbOtpChallengeRepository {
            db: self.db.clone(),
        }
    }

    pub fn booking_repo(&self) -> DbBookingRepository {
        DbBookingRepository {
            db: self.db.clone(),
        }
    }

    pub fn inquiry_repo(&self) -> DbInquiryRepository {
        DbInquiryRepository {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> HttpMailer {
        HttpMailer {
            client: self.http.clone(),
            api_url: self.mail_api_url.clone(),
            api_key: self.mail_api_key.clone(),
            from_email: self.mail_from.clone(),
        }
    }

    pub fn notifier(&self) -> HttpNotificationPublisher {
        HttpNotificationPublisher {
            client: self.http.clone(),
            base_url: self.notifications_url.clone(),
        }
    }
}
