//! Back-office console for the Robusta coffee shop.
//!
//! Staff-facing twin of the storefront: every request passes one permission
//! gate ([`middleware::auth::Authorized`]) that checks the signed-in staff
//! member's role against the page being opened, and all data access goes
//! through the backend API with the staff member's bearer token.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod state;
