//! Shopfront storefront library.
//!
//! JSON backend for accounts, the product catalog, carts, orders, reviews,
//! addresses, payments and session records. Exposed as a library so the
//! binary, the CLI and the integration tests share one router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
