//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The portal serves a handful of server-rendered pages. `/` is gated by the
//! session guard; `/login` and `/error` stay reachable without a cookie so
//! the redirect targets always resolve.

pub mod auth;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/error", get(pages::error_page))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
