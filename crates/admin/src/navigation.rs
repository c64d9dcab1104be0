//! The sidebar menu and its role-based filtering.
//!
//! One table defines every console page; what a given staff member sees is
//! always `visible_menu_entries` over this table, and the same table decides
//! where to land someone who opened a page they cannot access.

use robusta_core::permissions::{MenuEntry, Role, visible_menu_entries};

pub const MENU: &[MenuEntry] = &[
    MenuEntry::new("Dashboard", "/dashboard"),
    MenuEntry::new("Point of Sale", "/pos"),
    MenuEntry::new("Orders", "/orders"),
    MenuEntry::new("Products", "/products"),
    MenuEntry::new("Inventory", "/inventory"),
    MenuEntry::new("Tables", "/tables"),
    MenuEntry::new("Promotions", "/promotions"),
    MenuEntry::new("Staff", "/staff"),
    MenuEntry::new("Settings", "/settings"),
];

/// Entries the role may open, in menu order.
#[must_use]
pub fn entries_for(role: Option<Role>) -> Vec<MenuEntry> {
    visible_menu_entries(role, MENU)
}

/// Where to send someone who cannot open the page they asked for: the first
/// page they *can* see, or the login page when there is none.
#[must_use]
pub fn fallback_page(role: Option<Role>) -> &'static str {
    entries_for(role)
        .first()
        .map_or("/auth/login", |entry| entry.path)
}
