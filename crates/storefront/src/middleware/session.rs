//! Session layer configuration.
//!
//! The session carries the cart, the applied promotion, and the signed-in
//! customer. Stored in memory; a restart signs everyone out and empties
//! carts, which is acceptable for this deployment.

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

const SESSION_COOKIE: &str = "robusta_session";
const SESSION_TTL_DAYS: i64 = 7;

#[must_use]
pub fn layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_TTL_DAYS)))
}
