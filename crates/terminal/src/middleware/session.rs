//! Session middleware configuration.
//!
//! Sessions live in process memory and carry only the id of the operator's
//! cart. Both are gone after a restart.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::TerminalConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "till_session";

/// Idle time before a session (and its cart) is discarded: one 12 hour shift.
pub const SESSION_EXPIRY_SECONDS: i64 = 12 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &TerminalConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
