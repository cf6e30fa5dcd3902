use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use domus_core::health::{healthz, readyz};
use domus_core::middleware::request_id_layer;

use crate::handlers::bookings::{
    approve_cs, approve_sales, create_booking, get_booking, list_bookings, reject_booking,
    update_booking_status,
};
use crate::handlers::inquiries::{list_inquiries, submit_inquiry};
use crate::handlers::otp::{send_otp, verify_otp};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // OTP gate
        .route("/otp/send", post(send_otp))
        .route("/otp/verify", post(verify_otp))
        // Bookings
        .route("/bookings", post(create_booking))
        .route("/bookings", get(list_bookings))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/cs-approval", patch(approve_cs))
        .route("/bookings/{id}/sales-approval", patch(approve_sales))
        .route("/bookings/{id}/rejection", patch(reject_booking))
        .route("/bookings/{id}/status", patch(update_booking_status))
        // Inquiries
        .route("/inquiries", post(submit_inquiry))
        .route("/inquiries", get(list_inquiries))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
