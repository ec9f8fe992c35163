use std::collections::HashMap;

use axum::Router;
use axum::extract::Form;
use axum::http::{StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::routing::{get, post};

use super::*;
use crate::config::{AppConfig, IdentityTimeouts};

// =============================================================================
// SET-COOKIE PARSING
// =============================================================================

fn headers_with(values: &[&str]) -> reqwest::header::HeaderMap {
    let mut headers = reqwest::header::HeaderMap::new();
    for value in values {
        headers.append(
            reqwest::header::SET_COOKIE,
            value.parse().expect("header value should parse"),
        );
    }
    headers
}

#[test]
fn session_token_parsed_from_single_cookie() {
    let headers = headers_with(&["SESSION=abc123; Path=/; HttpOnly"]);
    assert_eq!(session_token_from_headers(&headers).as_deref(), Some("abc123"));
}

#[test]
fn session_token_parsed_without_attributes() {
    let headers = headers_with(&["SESSION=abc123"]);
    assert_eq!(session_token_from_headers(&headers).as_deref(), Some("abc123"));
}

#[test]
fn session_token_skips_other_cookies() {
    let headers = headers_with(&["theme=dark; Path=/", "SESSION=tok; Path=/"]);
    assert_eq!(session_token_from_headers(&headers).as_deref(), Some("tok"));
}

#[test]
fn session_token_missing_returns_none() {
    let headers = headers_with(&["theme=dark; Path=/"]);
    assert!(session_token_from_headers(&headers).is_none());
}

#[test]
fn session_token_empty_value_returns_none() {
    let headers = headers_with(&["SESSION=; Path=/"]);
    assert!(session_token_from_headers(&headers).is_none());
}

#[test]
fn session_token_no_headers_returns_none() {
    let headers = reqwest::header::HeaderMap::new();
    assert!(session_token_from_headers(&headers).is_none());
}

// =============================================================================
// HTTP CLIENT — exercised against a throwaway local listener
// =============================================================================

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub serve failed");
    });
    format!("http://{addr}")
}

fn client_for(base_url: String) -> HttpIdentityService {
    let config = AppConfig {
        port: 0,
        identity_base_url: base_url,
        identity_timeouts: IdentityTimeouts { request_secs: 1, connect_secs: 1 },
        cookie_secure: false,
    };
    HttpIdentityService::new(&config).expect("client should build")
}

async fn stub_login(Form(form): Form<HashMap<String, String>>) -> Response {
    let ok = form.get("username").map(String::as_str) == Some("alice")
        && form.get("password").map(String::as_str) == Some("pw");
    if ok {
        (AppendHeaders([(header::SET_COOKIE, "SESSION=stub-token; Path=/; HttpOnly")]), "ok").into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

#[tokio::test]
async fn resolve_username_returns_body_verbatim() {
    let base = spawn_stub(Router::new().route("/username", get(|| async { "alice" }))).await;
    let client = client_for(base);

    let user = client.resolve_username().await.expect("lookup should succeed");
    assert_eq!(user, "alice");
}

#[tokio::test]
async fn resolve_username_non_success_is_status_error() {
    let base = spawn_stub(Router::new().route("/username", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))).await;
    let client = client_for(base);

    let err = client.resolve_username().await.expect_err("lookup should fail");
    assert!(matches!(err, IdentityError::Status(500)), "got {err}");
}

#[tokio::test]
async fn resolve_username_connection_refused_is_transport_error() {
    // Port 1 is never listening locally.
    let client = client_for("http://127.0.0.1:1".into());

    let err = client.resolve_username().await.expect_err("lookup should fail");
    assert!(matches!(err, IdentityError::Transport(_)), "got {err}");
}

#[tokio::test]
async fn resolve_username_timeout_is_transport_error() {
    let base = spawn_stub(Router::new().route(
        "/username",
        get(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            "late"
        }),
    ))
    .await;
    let client = client_for(base);

    let err = client.resolve_username().await.expect_err("lookup should time out");
    assert!(matches!(err, IdentityError::Transport(_)), "got {err}");
}

#[tokio::test]
async fn login_forwards_form_and_extracts_session_token() {
    let base = spawn_stub(Router::new().route("/login", post(stub_login))).await;
    let client = client_for(base);

    let token = client.login("alice", "pw").await.expect("login should succeed");
    assert_eq!(token, "stub-token");
}

#[tokio::test]
async fn login_rejected_upstream_is_status_error() {
    let base = spawn_stub(Router::new().route("/login", post(stub_login))).await;
    let client = client_for(base);

    let err = client.login("alice", "wrong").await.expect_err("login should fail");
    assert!(matches!(err, IdentityError::Status(401)), "got {err}");
}

#[tokio::test]
async fn login_without_session_cookie_is_error() {
    let base = spawn_stub(Router::new().route("/login", post(|| async { "ok" }))).await;
    let client = client_for(base);

    let err = client.login("alice", "pw").await.expect_err("login should fail");
    assert!(matches!(err, IdentityError::MissingSessionCookie), "got {err}");
}

// =============================================================================
// ERROR DISPLAY
// =============================================================================

#[test]
fn identity_error_status_display() {
    let err = IdentityError::Status(502);
    assert!(err.to_string().contains("502"));
}

#[test]
fn identity_error_transport_display() {
    let err = IdentityError::Transport("connection reset".into());
    assert!(err.to_string().contains("connection reset"));
}
