//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all Shopfront components:
//! - `storefront` - The HTTP backend (users, products, carts, orders, ...)
//! - `cli` - Command-line tools for schema setup and catalog management
//!
//! # Architecture
//!
//! The core crate contains only types and their validation rules - no I/O,
//! no database access, no HTTP. With the `sqlite` feature enabled the types
//! also implement the `sqlx` encode/decode traits so they can be bound and
//! fetched directly.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, ratings and quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
