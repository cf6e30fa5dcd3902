use sea_orm::Database;
use tracing::info;

use domus_engagement::config::EngagementConfig;
use domus_engagement::router::build_router;
use domus_engagement::state::AppState;

#[tokio::main]
async fn main() {
    domus_core::tracing::init_tracing();

    let config = EngagementConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        http: reqwest::Client::new(),
        mail_api_url: config.mail_api_url,
        mail_api_key: config.mail_api_key,
        mail_from: config.mail_from,
        notifications_url: config.notifications_url,
    };
    let router = build_router(state);

    let addr = format!("0.0.0.0:{}", config.engagement_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("engagement service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
