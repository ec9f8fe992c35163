//! Identity service client — username resolution and login forwarding.
//!
//! ARCHITECTURE
//! ============
//! The backend identity service owns credentials and session issuance; the
//! portal only relays. Route handlers depend on the `IdentityService` trait
//! so tests can swap in a mock, and every call site must handle both the
//! success and failure branch explicitly.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::AppConfig;

/// Cookie name issued by the identity service and relayed to the browser.
pub const SESSION_COOKIE: &str = "SESSION";

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity service unreachable: {0}")]
    Transport(String),
    #[error("identity service returned status {0}")]
    Status(u16),
    #[error("login response did not set a SESSION cookie")]
    MissingSessionCookie,
}

/// Calls the portal makes against the backend identity service.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolve the current session's display username.
    async fn resolve_username(&self) -> Result<String, IdentityError>;

    /// Forward login credentials; returns the `SESSION` token issued upstream.
    async fn login(&self, username: &str, password: &str) -> Result<String, IdentityError>;
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

/// Production implementation backed by `reqwest`.
pub struct HttpIdentityService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityService {
    /// Build a client with the configured connect/request timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.identity_timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.identity_timeouts.connect_secs))
            .build()
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        Ok(Self { client, base_url: config.identity_base_url.clone() })
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn resolve_username(&self) -> Result<String, IdentityError> {
        let resp = self
            .client
            .get(format!("{}/username", self.base_url))
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(IdentityError::Status(resp.status().as_u16()));
        }

        // Response body is the plain-text username, used verbatim.
        resp.text().await.map_err(|e| IdentityError::Transport(e.to_string()))
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, IdentityError> {
        let resp = self
            .client
            .post(format!("{}/login", self.base_url))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if resp.status().as_u16() != 200 {
            return Err(IdentityError::Status(resp.status().as_u16()));
        }

        session_token_from_headers(resp.headers()).ok_or(IdentityError::MissingSessionCookie)
    }
}

/// Extract the `SESSION` value from upstream `Set-Cookie` headers.
pub(crate) fn session_token_from_headers(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .find_map(|value| {
            let raw = value.to_str().ok()?;
            let (name, rest) = raw.split_once('=')?;
            if name.trim() != SESSION_COOKIE {
                return None;
            }
            let token = rest.split(';').next()?.trim();
            (!token.is_empty()).then(|| token.to_owned())
        })
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
