use chrono::Utc;
use rand::RngExt;

use crate::domain::repository::{OtpChallengeRepository, OtpMailer};
use crate::domain::types::{OTP_CODE_LEN, OtpChallenge, is_valid_otp_format, validate_email};
use crate::error::EngagementServiceError;

/// Charset for generated codes: digits only, keypad-friendly.
const CHARSET: &[u8] = b"0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── RequestOtp ───────────────────────────────────────────────────────────────

pub struct RequestOtpInput {
    pub email: String,
    pub purpose: String,
}

pub struct RequestOtpUseCase<R, M>
where
    R: OtpChallengeRepository,
    M: OtpMailer,
{
    pub otps: R,
    pub mailer: M,
}

impl<R, M> RequestOtpUseCase<R, M>
where
    R: OtpChallengeRepository,
    M: OtpMailer,
{
    pub async fn execute(&self, input: RequestOtpInput) -> Result<(), EngagementServiceError> {
        let email = input.email.trim().to_ascii_lowercase();
        if !validate_email(&email) {
            return Err(EngagementServiceError::InvalidEmail);
        }

        let code = generate_code();
        let challenge = OtpChallenge::issue(email.clone(), input.purpose, code.clone(), Utc::now());

        // Persist first: a resend always invalidates the previous code,
        // even if delivery of the new one then fails.
        self.otps.replace(&challenge).await?;
        self.mailer.send_code(&email, &code, &challenge.purpose).await?;

        tracing::debug!(challenge_id = %challenge.id, "otp challenge issued");
        Ok(())
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyOtpUseCase<R: OtpChallengeRepository> {
    pub otps: R,
}

impl<R: OtpChallengeRepository> VerifyOtpUseCase<R> {
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<(), EngagementServiceError> {
        let code = input.code.trim();
        if !is_valid_otp_format(code) {
            return Err(EngagementServiceError::InvalidOtpFormat);
        }
        let email = input.email.trim().to_ascii_lowercase();

        let now = Utc::now();
        let challenge = self.otps.find_latest(&email).await?;
        // One undifferentiated rejection: the caller learns nothing about
        // whether the code was wrong, expired, or never issued.
        let challenge = match challenge {
            Some(c) if c.is_live(now) && c.code == code => c,
            _ => return Err(EngagementServiceError::InvalidOtp),
        };

        self.otps.mark_verified(challenge.id, now).await?;
        Ok(())
    }
}
