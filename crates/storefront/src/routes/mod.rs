//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the database)
//!
//! # Auth
//! GET  /register               - Registration form descriptor
//! POST /register               - Create an account
//! GET  /login                  - Login form descriptor
//! POST /login                  - Log in
//! POST /logout                 - Log out
//!
//! # Catalog (public)
//! GET  /products               - Filtered, sorted, paginated product list
//! POST /create_category        - Create a category
//! GET  /get_categories         - List categories
//!
//! # Account (requires auth)
//! GET  /dashboard              - Aggregate view
//! POST /create_order           - Create an order
//! GET  /get_user_orders        - List own orders
//! POST /add_to_cart            - Add a cart entry
//! GET  /get_user_cart          - List own cart
//! POST /add_review             - Review a product
//! GET  /get_user_reviews       - List own reviews
//! POST /add_address            - Add an address
//! GET  /get_user_addresses     - List own addresses
//! POST /add_payment            - Record a payment
//! GET  /get_user_payments      - List own payments
//! POST /add_session            - Store a session record
//! GET  /get_user_sessions      - List own session records
//! ```

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod sessions;

use std::str::FromStr;
use std::time::Duration;

use axum::{
    Json, Router,
    http::StatusCode,
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;
use tracing::Span;

use crate::error::AppError;
use crate::middleware::{auth_rate_limiter, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the auth routes router.
///
/// `/register` and `/login` are rate limited when enabled in configuration.
pub fn auth_routes(rate_limited: bool) -> Router<AppState> {
    let routes = Router::new()
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login));

    let routes = if rate_limited {
        routes.layer(auth_rate_limiter())
    } else {
        routes
    };

    routes.route("/logout", post(auth::logout))
}

/// Create the catalog routes router (no authentication).
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/create_category", post(categories::create))
        .route("/get_categories", get(categories::index))
}

/// Create the per-user resource routes router (authentication required).
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::show))
        .route("/create_order", post(orders::create))
        .route("/get_user_orders", get(orders::index))
        .route("/add_to_cart", post(cart::add))
        .route("/get_user_cart", get(cart::index))
        .route("/add_review", post(reviews::create))
        .route("/get_user_reviews", get(reviews::index))
        .route("/add_address", post(addresses::create))
        .route("/get_user_addresses", get(addresses::index))
        .route("/add_payment", post(payments::create))
        .route("/get_user_payments", get(payments::index))
        .route("/add_session", post(sessions::create))
        .route("/get_user_sessions", get(sessions::index))
}

/// Build the complete application router.
///
/// Sentry layers are added by the binary on top of this.
pub fn router(state: AppState, session_layer: SessionManagerLayer<SqliteStore>) -> Router {
    let rate_limited = state.config().rate_limit_enabled;

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth_routes(rate_limited))
        .merge(catalog_routes())
        .merge(account_routes())
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

// =============================================================================
// Shared handler helpers
// =============================================================================

/// `201 Created` with `{"message": ...}`.
fn created(message: &str) -> Response {
    (StatusCode::CREATED, Json(json!({ "message": message }))).into_response()
}

/// Trim a form field and reject it when empty.
fn required(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

/// Parse a required form field.
fn parse_field<T: FromStr>(value: &str, field: &str) -> Result<T, AppError> {
    required(value, field)?
        .parse()
        .map_err(|_| AppError::Validation(format!("{field} is not a valid number")))
}
