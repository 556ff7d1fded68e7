//! Registration, login and logout over HTTP.

use axum::http::StatusCode;

use shopfront_integration_tests::TestApp;

#[tokio::test]
async fn test_register_then_login() {
    let mut app = TestApp::spawn().await;

    let res = app.register("alice", "a@x.com", "secret1").await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.message(), Some("User registered successfully"));

    let res = app.login("alice", "secret1").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["user"]["username"], "alice");

    let res = app.get("/dashboard").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let mut app = TestApp::spawn().await;
    app.register("alice", "a@x.com", "secret1").await;

    let wrong = app.login("alice", "wrong").await;
    let unknown = app.login("nobody", "secret1").await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.error(), Some("Invalid username or password"));
    assert_eq!(wrong.body, unknown.body);

    assert_eq!(app.get("/dashboard").await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_username_and_email() {
    let mut app = TestApp::spawn().await;
    assert_eq!(
        app.register("alice", "a@x.com", "secret1").await.status,
        StatusCode::CREATED
    );

    let res = app.register("alice", "other@x.com", "secret1").await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.error(), Some("Username already exists"));

    let res = app.register("alice2", "a@x.com", "secret1").await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.error(), Some("Email already exists"));
}

#[tokio::test]
async fn test_registration_validation() {
    let mut app = TestApp::spawn().await;

    let res = app
        .post_form("/register", &[("username", "alice"), ("email", "a@x.com")])
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), Some("All fields are required"));

    let res = app
        .post_form(
            "/register",
            &[
                ("username", "alice"),
                ("email", "a@x.com"),
                ("name", "Alice"),
                ("password", "secret1"),
                ("confirm_password", "secret2"),
            ],
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), Some("Passwords do not match"));

    // Nothing was stored, so the name is still free
    assert_eq!(
        app.register("alice", "a@x.com", "secret1").await.status,
        StatusCode::CREATED
    );
}

#[tokio::test]
async fn test_form_descriptors() {
    let mut app = TestApp::spawn().await;

    let res = app.get("/register").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["form"], "register");

    let res = app.get("/login").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["form"], "login");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let mut app = TestApp::spawn().await;
    app.sign_in("alice").await;
    assert_eq!(app.get("/get_user_orders").await.status, StatusCode::OK);

    let res = app.post_form("/logout", &[]).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get("/get_user_orders").await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error(), Some("Authentication required"));
}

#[tokio::test]
async fn test_protected_routes_require_login() {
    let mut app = TestApp::spawn().await;

    for uri in [
        "/dashboard",
        "/get_user_orders",
        "/get_user_cart",
        "/get_user_reviews",
        "/get_user_addresses",
        "/get_user_payments",
        "/get_user_sessions",
    ] {
        let res = app.get(uri).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "GET {uri}");
        assert_eq!(res.error(), Some("Authentication required"));
    }

    for uri in [
        "/create_order",
        "/add_to_cart",
        "/add_review",
        "/add_address",
        "/add_payment",
        "/add_session",
    ] {
        let res = app.post_form(uri, &[]).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "POST {uri}");
    }
}
