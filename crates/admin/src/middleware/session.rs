//! Session layer configuration.
//!
//! A shorter TTL than the storefront: console sessions go stale after eight
//! hours of inactivity.

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::AdminConfig;

const SESSION_COOKIE: &str = "robusta_admin_session";
const SESSION_TTL_HOURS: i64 = 8;

#[must_use]
pub fn layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::hours(SESSION_TTL_HOURS)))
}
