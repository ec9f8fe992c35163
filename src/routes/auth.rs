//! Auth routes — login form flow, logout, and the session guard extractor.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use super::pages;
use crate::services::identity::{IdentityError, SESSION_COOKIE};
use crate::state::AppState;

/// 302 Found with a `Location` header. Axum's `Redirect` helpers emit
/// 303/307/308; the login flow keeps plain 302 semantics.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

// =============================================================================
// SESSION GUARD
// =============================================================================

/// Marker extractor gating a page on the `SESSION` cookie.
/// A request without the cookie short-circuits into a 302 redirect to
/// `/login` before the handler runs. Presence is the only signal; the
/// token's content is validated by the identity service, not here.
pub struct SessionGuard;

impl<S> axum::extract::FromRequestParts<S> for SessionGuard
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, _state: &S) -> Result<Self, Self::Rejection> {
        tracing::debug!(path = %parts.uri.path(), "session guard");

        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(found("/login"));
        }

        Ok(Self)
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `GET /login` — render the login form.
pub async fn login_page() -> Html<String> {
    Html(pages::render_login(None))
}

/// `POST /login` — validate the form, forward credentials to the identity
/// service, relay the issued `SESSION` cookie, redirect to `/`.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<LoginForm>,
) -> Response {
    if form.username.is_empty() {
        return (StatusCode::BAD_REQUEST, Html(pages::render_login(Some("username is required")))).into_response();
    }
    if form.password.is_empty() {
        return (StatusCode::BAD_REQUEST, Html(pages::render_login(Some("password is required")))).into_response();
    }

    let token = match state.identity.login(&form.username, &form.password).await {
        Ok(token) => token,
        Err(IdentityError::Status(code)) => {
            tracing::warn!(status = code, username = %form.username, "login rejected by identity service");
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::UNAUTHORIZED);
            return (status, Html(pages::render_login(Some("incorrect username or password")))).into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "identity login failed");
            return (StatusCode::BAD_GATEWAY, Html(pages::render_login(Some("login service unavailable")))).into_response();
        }
    };

    // Replaces any stale SESSION cookie: same name and path overwrite.
    let cookie = session_cookie(token, state.config.cookie_secure);
    (jar.add(cookie), found("/")).into_response()
}

/// `POST /logout` — clear the `SESSION` cookie, redirect to `/login`.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = expired_session_cookie(state.config.cookie_secure);
    (CookieJar::new().add(cookie), found("/login"))
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
