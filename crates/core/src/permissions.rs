//! Role/capability gate for the admin console.
//!
//! One fixed table maps each role to the capabilities it holds, and one maps
//! each admin page root to the capability it requires. Every admin request
//! and every sidebar render goes through [`check_access`] /
//! [`visible_menu_entries`]; no page carries its own ad-hoc role check.

use serde::{Deserialize, Serialize};

/// The authorization classifier of a user.
///
/// Unknown role strings fail to parse; callers carry them as `None`, which
/// [`check_access`] denies everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Customer,
}

impl Role {
    /// Whether the role holds a capability.
    ///
    /// Admin holds everything, customers hold nothing.
    #[must_use]
    pub const fn has_capability(self, capability: Capability) -> bool {
        match self {
            Self::Admin => true,
            Self::Staff => matches!(
                capability,
                Capability::ManageOrders
                    | Capability::ManageInventory
                    | Capability::ManageTables
                    | Capability::UsePos
                    | Capability::ViewReports
            ),
            Self::Customer => false,
        }
    }

    /// Whether the role may sign in to the admin console at all.
    #[must_use]
    pub const fn is_back_office(self) -> bool {
        matches!(self, Self::Admin | Self::Staff)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Staff => write!(f, "staff"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            "customer" => Ok(Self::Customer),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// A named permission gating access to an admin page or action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ManageProducts,
    ManageInventory,
    ManageOrders,
    ManageStaff,
    ManageTables,
    ManageSettings,
    ManagePromotions,
    ViewReports,
    UsePos,
}

/// Page root path -> required capability.
///
/// A page absent from this table only requires an authenticated back-office
/// role.
const PAGE_CAPABILITIES: &[(&str, Capability)] = &[
    ("/dashboard", Capability::ViewReports),
    ("/pos", Capability::UsePos),
    ("/orders", Capability::ManageOrders),
    ("/products", Capability::ManageProducts),
    ("/inventory", Capability::ManageInventory),
    ("/tables", Capability::ManageTables),
    ("/promotions", Capability::ManagePromotions),
    ("/staff", Capability::ManageStaff),
    ("/settings", Capability::ManageSettings),
];

/// The capability a page requires, if any.
#[must_use]
pub fn required_capability(page: &str) -> Option<Capability> {
    let root = page_root(page);
    PAGE_CAPABILITIES
        .iter()
        .find(|(path, _)| *path == root)
        .map(|(_, capability)| *capability)
}

/// The first path segment of a page path ("/orders/42/status" -> "/orders").
#[must_use]
pub fn page_root(page: &str) -> &str {
    let trimmed = page.trim_start_matches('/');
    match trimmed.find('/') {
        // `find` returns a char boundary within `page`.
        #[allow(clippy::indexing_slicing)]
        Some(end) => &page[..page.len() - trimmed.len() + end],
        None => page,
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Permitted,
    Denied,
}

impl AccessDecision {
    /// Whether access was granted.
    #[must_use]
    pub const fn is_permitted(self) -> bool {
        matches!(self, Self::Permitted)
    }
}

/// Decide whether a role may open a page.
///
/// - No role (unauthenticated, or an unknown role string): denied.
/// - Admin: always permitted.
/// - Otherwise the page's required capability must be held; pages without an
///   entry in the table require only an authenticated role.
#[must_use]
pub fn check_access(role: Option<Role>, page: &str) -> AccessDecision {
    let Some(role) = role else {
        return AccessDecision::Denied;
    };

    if role == Role::Admin {
        return AccessDecision::Permitted;
    }

    match required_capability(page) {
        Some(capability) if role.has_capability(capability) => AccessDecision::Permitted,
        Some(_) => AccessDecision::Denied,
        None => AccessDecision::Permitted,
    }
}

/// A navigational entry in the admin sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub label: &'static str,
    pub path: &'static str,
}

impl MenuEntry {
    /// Define a menu entry.
    #[must_use]
    pub const fn new(label: &'static str, path: &'static str) -> Self {
        Self { label, path }
    }
}

/// Filter navigation entries down to those the role may open.
///
/// Pure and idempotent; admin sees everything, customers and missing roles
/// see none of the gated entries.
#[must_use]
pub fn visible_menu_entries(role: Option<Role>, entries: &[MenuEntry]) -> Vec<MenuEntry> {
    entries
        .iter()
        .copied()
        .filter(|entry| check_access(role, entry.path).is_permitted())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRIES: &[MenuEntry] = &[
        MenuEntry::new("Dashboard", "/dashboard"),
        MenuEntry::new("Orders", "/orders"),
        MenuEntry::new("Products", "/products"),
        MenuEntry::new("Settings", "/settings"),
    ];

    #[test]
    fn test_admin_always_passes() {
        assert!(check_access(Some(Role::Admin), "/settings").is_permitted());
        assert!(check_access(Some(Role::Admin), "/anything-at-all").is_permitted());
    }

    #[test]
    fn test_staff_denied_settings_permitted_orders() {
        assert_eq!(
            check_access(Some(Role::Staff), "/settings"),
            AccessDecision::Denied
        );
        assert_eq!(
            check_access(Some(Role::Staff), "/orders"),
            AccessDecision::Permitted
        );
    }

    #[test]
    fn test_customer_denied_admin_pages() {
        assert_eq!(
            check_access(Some(Role::Customer), "/orders"),
            AccessDecision::Denied
        );
        assert_eq!(
            check_access(Some(Role::Customer), "/dashboard"),
            AccessDecision::Denied
        );
    }

    #[test]
    fn test_missing_role_denied_everywhere() {
        assert_eq!(check_access(None, "/orders"), AccessDecision::Denied);
        assert_eq!(check_access(None, "/unlisted"), AccessDecision::Denied);
    }

    #[test]
    fn test_unlisted_page_requires_only_a_role() {
        assert!(check_access(Some(Role::Staff), "/profile").is_permitted());
    }

    #[test]
    fn test_nested_paths_use_page_root() {
        assert!(check_access(Some(Role::Staff), "/orders/42/status").is_permitted());
        assert_eq!(
            check_access(Some(Role::Staff), "/settings/shipping"),
            AccessDecision::Denied
        );
    }

    #[test]
    fn test_page_root() {
        assert_eq!(page_root("/orders"), "/orders");
        assert_eq!(page_root("/orders/42"), "/orders");
        assert_eq!(page_root("/"), "/");
    }

    #[test]
    fn test_menu_visibility() {
        let admin = visible_menu_entries(Some(Role::Admin), ENTRIES);
        assert_eq!(admin.len(), ENTRIES.len());

        let staff = visible_menu_entries(Some(Role::Staff), ENTRIES);
        let staff_paths: Vec<_> = staff.iter().map(|entry| entry.path).collect();
        assert_eq!(staff_paths, vec!["/dashboard", "/orders"]);

        assert!(visible_menu_entries(Some(Role::Customer), ENTRIES).is_empty());
        assert!(visible_menu_entries(None, ENTRIES).is_empty());
    }

    #[test]
    fn test_menu_visibility_idempotent() {
        let once = visible_menu_entries(Some(Role::Staff), ENTRIES);
        let twice = visible_menu_entries(Some(Role::Staff), ENTRIES);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_role_string_fails_to_parse() {
        assert!("superuser".parse::<Role>().is_err());
        assert_eq!("staff".parse::<Role>(), Ok(Role::Staff));
    }
}
