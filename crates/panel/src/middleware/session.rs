//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions with strict settings
//! (SameSite=Strict, 24h inactivity expiry). The cookie carries only a
//! session id; the seller record itself lives in the
//! [`SessionHub`](crate::services::SessionHub).

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::PanelConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "sellerdesk_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// The panel deliberately has no database; sessions die with the process
/// and sellers re-authenticate against the upstream API.
#[must_use]
pub fn create_session_layer(config: &PanelConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    // Secure cookies when the panel is served over HTTPS
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
