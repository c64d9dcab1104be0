//! User account records.

use serde::{Deserialize, Deserializer, Serialize};

use crate::permissions::Role;
use crate::types::{Email, UserId};

/// A user account as known to the backend.
///
/// `role` is `None` when the backend sent a role string this build does not
/// know; the permission gate denies such users everywhere rather than
/// guessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "role_lenient")]
    pub role: Option<Role>,
}

/// Deserialize a role, mapping unknown role strings to `None` instead of
/// failing the whole record. The gate treats `None` as "deny everywhere".
pub fn role_lenient<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}
