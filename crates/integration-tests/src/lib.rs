//! Test harness for the Shopfront storefront.
//!
//! [`TestApp`] builds the real router over a private in-memory database and
//! drives it with `tower::ServiceExt::oneshot`, carrying the session cookie
//! between requests the way a browser would.
//!
//! ```rust,ignore
//! let mut app = TestApp::spawn().await;
//! app.register("alice", "a@x.com", "secret1").await;
//! app.login("alice", "secret1").await;
//! let res = app.get("/get_user_orders").await;
//! assert_eq!(res.status, StatusCode::OK);
//! ```

#![allow(clippy::missing_panics_doc)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
};
use std::sync::Arc;

use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use shopfront_core::{CategoryId, Price, ProductId};
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::db::schema::ensure_schema;
use shopfront_storefront::db::{Database, ProductRepository};
use shopfront_storefront::middleware::{create_session_layer, create_session_store};
use shopfront_storefront::models::NewProduct;
use shopfront_storefront::routes;
use shopfront_storefront::services::{ActivityFeed, NoActivity};
use shopfront_storefront::state::AppState;

/// Status and decoded body of one response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// Parsed JSON, or the raw text as a JSON string when the body is not JSON.
    pub body: Value,
}

impl TestResponse {
    /// The `error` field of an error body.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    /// The `message` field of a success body.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// The array stored under `key`.
    #[must_use]
    pub fn list(&self, key: &str) -> &Vec<Value> {
        self.body
            .get(key)
            .and_then(Value::as_array)
            .unwrap_or_else(|| panic!("response has no '{key}' list: {}", self.body))
    }
}

/// Configuration for tests: no rate limiting, plain HTTP cookies.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        db_max_connections: 1,
        rate_limit_enabled: false,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// One client talking to a freshly built storefront.
pub struct TestApp {
    router: Router,
    db: Database,
    cookie: Option<String>,
}

impl TestApp {
    /// Build the storefront over an empty in-memory database.
    pub async fn spawn() -> Self {
        Self::spawn_with_activity_feed(Arc::new(NoActivity)).await
    }

    /// Build the storefront with dashboard activity read from `activity`.
    pub async fn spawn_with_activity_feed(activity: Arc<dyn ActivityFeed>) -> Self {
        let db = Database::in_memory()
            .await
            .expect("Failed to open in-memory database");
        let failed = ensure_schema(&db).await;
        assert!(failed.is_empty(), "schema creation failed for {failed:?}");

        let config = test_config();
        let store = create_session_store(&db)
            .await
            .expect("Failed to prepare session store");
        let session_layer = create_session_layer(store, &config);
        let state = AppState::with_activity_feed(config, db.clone(), activity);
        let router = routes::router(state, session_layer);

        Self {
            router,
            db,
            cookie: None,
        }
    }

    /// The database behind the router.
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Forget the session cookie, as a new browser would.
    pub fn clear_cookie(&mut self) {
        self.cookie = None;
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request("GET", uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(fields).expect("Failed to encode form");
        let request = self
            .request("POST", uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn register(&mut self, username: &str, email: &str, password: &str) -> TestResponse {
        self.post_form(
            "/register",
            &[
                ("username", username),
                ("email", email),
                ("name", "Test User"),
                ("password", password),
                ("confirm_password", password),
            ],
        )
        .await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    /// Register and log in, asserting both succeed.
    pub async fn sign_in(&mut self, username: &str) {
        let email = format!("{username}@example.com");
        let res = self.register(username, &email, "secret1").await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        let res = self.login(username, "secret1").await;
        assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    }

    /// Insert a product directly, bypassing HTTP.
    pub async fn product(&self, name: &str, price: &str, category: Option<CategoryId>) -> ProductId {
        ProductRepository::new(&self.db)
            .create(NewProduct {
                name: name.to_owned(),
                description: format!("{name} description"),
                price: Price::parse(price).expect("Invalid test price"),
                stock_quantity: 10,
                category_id: category,
            })
            .await
            .expect("Failed to insert product")
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            self.cookie = session_cookie(set_cookie);
        }

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse { status, body }
    }
}

/// `name=value` from a `Set-Cookie` header, or `None` when it removes the cookie.
fn session_cookie(set_cookie: &str) -> Option<String> {
    let pair = set_cookie.split(';').next()?.trim();
    let (_, value) = pair.split_once('=')?;
    let removed = value.is_empty()
        || set_cookie
            .split(';')
            .any(|attr| attr.trim().eq_ignore_ascii_case("Max-Age=0"));

    (!removed).then(|| pair.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie() {
        assert_eq!(
            session_cookie("sf_session=abc; HttpOnly; SameSite=Lax; Path=/").as_deref(),
            Some("sf_session=abc")
        );
        assert_eq!(session_cookie("sf_session=; Max-Age=0; Path=/"), None);
        assert_eq!(session_cookie("sf_session=abc; Max-Age=0"), None);
    }
}
