/// Engagement service configuration loaded from environment variables.
#[derive(Debug)]
pub struct EngagementConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3121). Env var: `ENGAGEMENT_PORT`.
    pub engagement_port: u16,
    /// Transactional mail API endpoint (e.g. "https://api.mailer.example/send").
    pub mail_api_url: String,
    /// Bearer key for the mail API.
    pub mail_api_key: String,
    /// From address for OTP mails (default "noreply@domus.example").
    pub mail_from: String,
    /// Base URL of the notifications service (e.g. "http://notifications:3120").
    pub notifications_url: String,
}

impl EngagementConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            engagement_port: std::env::var("ENGAGEMENT_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3121),
            mail_api_url: std::env::var("MAIL_API_URL").expect("MAIL_API_URL"),
            mail_api_key: std::env::var("MAIL_API_KEY").expect("MAIL_API_KEY"),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@domus.example".to_owned()),
            notifications_url: std::env::var("NOTIFICATIONS_URL").expect("NOTIFICATIONS_URL"),
        }
    }
}
