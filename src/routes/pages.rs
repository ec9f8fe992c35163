//! Server-rendered pages.
//!
//! The home page is the session-gated entry point: the `SessionGuard`
//! extractor has already redirected cookie-less requests by the time `home`
//! runs, so the handler only deals with identity resolution.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use super::auth::{SessionGuard, found};
use crate::state::AppState;

/// Data handed to the page template after the guard completes.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    /// Display name resolved by the identity service.
    pub user: String,
}

/// `GET /` — protected home page.
///
/// Identity-lookup failure is a handled branch: the request is redirected to
/// the error page rather than surfacing a raw fault to the browser.
pub async fn home(State(state): State<AppState>, _session: SessionGuard) -> Response {
    match state.identity.resolve_username().await {
        Ok(user) => Html(render_home(&PageContext { user })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "identity lookup failed");
            found("/error")
        }
    }
}

/// `GET /error` — static error page for failed identity resolution.
pub async fn error_page() -> Html<String> {
    Html(render_error())
}

// =============================================================================
// TEMPLATES
// =============================================================================

fn render_home(ctx: &PageContext) -> String {
    let user = escape_html(&ctx.user);
    format!(
        "<!doctype html>\n<html>\n<head><title>Expenses</title></head>\n<body>\n\
         <header><span id=\"user\">{user}</span>\
         <form method=\"post\" action=\"/logout\"><button>Logout</button></form></header>\n\
         <main><h1>Expenses dashboard</h1></main>\n\
         </body>\n</html>\n"
    )
}

pub(crate) fn render_login(error: Option<&str>) -> String {
    let notice = error.map(|msg| format!("<p class=\"error\">{}</p>\n", escape_html(msg))).unwrap_or_default();
    format!(
        "<!doctype html>\n<html>\n<head><title>Login</title></head>\n<body>\n\
         <h1>Login</h1>\n{notice}\
         <form method=\"post\" action=\"/login\">\n\
         <input name=\"username\" placeholder=\"username\">\n\
         <input name=\"password\" type=\"password\" placeholder=\"password\">\n\
         <button>Login</button>\n\
         </form>\n</body>\n</html>\n"
    )
}

fn render_error() -> String {
    "<!doctype html>\n<html>\n<head><title>Error</title></head>\n<body>\n\
     <h1>Something went wrong</h1>\n\
     <p>We could not load your account. <a href=\"/login\">Try logging in again.</a></p>\n\
     </body>\n</html>\n"
        .to_string()
}

/// The identity service returns the username as raw text; escape it before
/// interpolating into markup.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
