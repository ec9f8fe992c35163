//! Application configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! One typed config object built once in `main` and injected through
//! `AppState` — no module-level singletons. Everything has a default so
//! the portal runs against a local identity service out of the box.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_IDENTITY_BASE_URL: &str = "http://localhost:8443";
pub const DEFAULT_IDENTITY_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Timeouts applied to every identity-service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen port for the portal itself.
    pub port: u16,
    /// Base URL of the backend identity service (no trailing slash).
    pub identity_base_url: String,
    pub identity_timeouts: IdentityTimeouts,
    /// Whether the `SESSION` cookie is marked `Secure`.
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `IDENTITY_BASE_URL`: default `http://localhost:8443`
    /// - `IDENTITY_REQUEST_TIMEOUT_SECS`: default 10
    /// - `IDENTITY_CONNECT_TIMEOUT_SECS`: default 5
    /// - `COOKIE_SECURE`: default false
    #[must_use]
    pub fn from_env() -> Self {
        let identity_base_url = std::env::var("IDENTITY_BASE_URL")
            .map_or_else(|_| DEFAULT_IDENTITY_BASE_URL.to_string(), |raw| normalize_base_url(&raw));

        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            identity_base_url,
            identity_timeouts: IdentityTimeouts {
                request_secs: env_parse("IDENTITY_REQUEST_TIMEOUT_SECS", DEFAULT_IDENTITY_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse("IDENTITY_CONNECT_TIMEOUT_SECS", DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS),
            },
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(false),
        }
    }
}

/// Trim whitespace and trailing slashes so path joins stay predictable.
pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
