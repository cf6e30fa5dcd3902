use anyhow::Context as _;
use serde::Serialize;

use crate::domain::repository::OtpMailer;
use crate::error::EngagementServiceError;

/// OTP delivery through the external transactional mail API.
#[derive(Clone)]
pub struct HttpMailer {
    pub client: reqwest::Client,
    pub api_url: String,
    pub api_key: String,
    pub from_email: String,
}

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    text: String,
}

impl OtpMailer for HttpMailer {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        purpose: &str,
    ) -> Result<(), EngagementServiceError> {
        let request = MailRequest {
            from: &self.from_email,
            to: email,
            subject: format!("Domus verification code ({purpose})"),
            text: format!("Your verification code is {code}. It expires in 5 minutes."),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("send otp email")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngagementServiceError::Internal(anyhow::anyhow!(
                "mail API returned {status}: {body}"
            )));
        }

        tracing::debug!(to = %email, "otp email dispatched");
        Ok(())
    }
}
