//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It carries the startup-built config and the identity client behind its
//! trait object — nothing here is mutated after construction.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::identity::IdentityService;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub identity: Arc<dyn IdentityService>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, identity: Arc<dyn IdentityService>) -> Self {
        Self { config: Arc::new(config), identity }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
