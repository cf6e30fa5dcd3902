use sea_orm::DatabaseConnection;

use crate::infra::db::DbNotificationRepository;

/// Shared application state passed to every handler via axum `State`.
/// The datastore handle is injected once at startup; handlers obtain
/// repositories from it rather than reaching for any global.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn notification_repo(&self) -> DbNotificationRepository {
        DbNotificationRepository {
            db: self.db.clone(),
        }
    }
}
