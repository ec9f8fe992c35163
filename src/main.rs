mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env();

    let identity = services::identity::HttpIdentityService::new(&config).expect("identity client init failed");
    tracing::info!(base_url = %config.identity_base_url, "identity client initialized");

    let addr = format!("0.0.0.0:{}", config.port);
    let state = state::AppState::new(config, Arc::new(identity));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await.expect("failed to bind");

    tracing::info!(%addr, "expense-portal listening");
    axum::serve(listener, app).await.expect("server failed");
}
