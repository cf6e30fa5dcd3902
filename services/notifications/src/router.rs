use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use domus_core::health::{healthz, readyz};
use domus_core::middleware::request_id_layer;

use crate::handlers::notifications::{
    create_notification, delete_notifications, list_notifications, update_notification,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Notification feed
        .route("/notifications", get(list_notifications))
        .route("/notifications", post(create_notification))
        .route("/notifications", put(update_notification))
        .route("/notifications", delete(delete_notifications))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
