//! Session-resident records and the keys they live under.

use robusta_core::permissions::Role;
use robusta_core::types::{Email, UserId};
use robusta_core::user::{self, User};
use serde::{Deserialize, Serialize};

/// Keys under which storefront state is stored in the session.
pub mod keys {
    pub const CURRENT_USER: &str = "current_user";
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const CART: &str = "cart";
    pub const APPLIED_PROMOTION: &str = "applied_promotion";
}

/// The signed-in customer, as cached in the session after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(default, deserialize_with = "user::role_lenient")]
    pub role: Option<Role>,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}
