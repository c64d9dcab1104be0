//! Robusta Core - Shared types and domain logic.
//!
//! This crate provides the common types and pure computations used across all
//! Robusta components:
//! - `storefront` - Public-facing shop
//! - `admin` - Internal administration console and point of sale
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no sessions. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money amounts, emails,
//!   and statuses
//! - [`cart`] - Cart lines and cart mutation rules
//! - [`pricing`] - Subtotal, shipping fee, discount, and grand total
//! - [`promotion`] - Promotion (discount code) records
//! - [`permissions`] - Role/capability gate for the admin console
//! - [`catalog`] - Product and category records
//! - [`order`] - Order payloads and persisted order records
//! - [`user`] - User account records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod permissions;
pub mod pricing;
pub mod promotion;
pub mod types;
pub mod user;

pub use types::*;
