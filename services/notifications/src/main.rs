use sea_orm::Database;
use tracing::info;

use domus_notifications::config::NotificationsConfig;
use domus_notifications::router::build_router;
use domus_notifications::state::AppState;

#[tokio::main]
async fn main() {
    domus_core::tracing::init_tracing();

    let config = NotificationsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };
    let router = build_router(state);

    let addr = format!("0.0.0.0:{}", config.notifications_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("notifications service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
