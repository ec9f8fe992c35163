//! Outbound service clients used by route handlers.

pub mod identity;
