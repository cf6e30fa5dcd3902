/// Notifications service configuration loaded from environment variables.
#[derive(Debug)]
pub struct NotificationsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3120). Env var: `NOTIFICATIONS_PORT`.
    pub notifications_port: u16,
}

impl NotificationsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            notifications_port: std::env::var("NOTIFICATIONS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3120),
        }
    }
}
