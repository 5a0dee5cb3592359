//! Session middleware configuration.
//!
//! The session is the per-browser storage slot: its cookie identifies the
//! browser and the cart lives under [`bistro_core::cart::STORAGE_KEY`].

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::BistroConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "bistro_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-process store.
///
/// Sessions do not survive a server restart; a cart restored from an
/// unknown session starts empty.
#[must_use]
pub fn create_session_layer(config: &BistroConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
