//! Session-resident records and the keys they live under.

use robusta_core::permissions::Role;
use robusta_core::types::{Email, UserId};
use robusta_core::user;
use serde::{Deserialize, Serialize};

pub mod keys {
    pub const CURRENT_STAFF: &str = "current_staff";
}

/// The signed-in staff member, cached in the session after login together
/// with their backend bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStaff {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(default, deserialize_with = "user::role_lenient")]
    pub role: Option<Role>,
    pub token: String,
}
