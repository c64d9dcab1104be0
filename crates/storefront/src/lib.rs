//! Customer-facing storefront for the Robusta coffee shop.
//!
//! A thin JSON frontend over the shop backend: it keeps the cart and the
//! signed-in customer in the server-side session, prices carts locally with
//! [`robusta_core::pricing`], and proxies catalog, auth, and order calls to
//! the backend API.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
