//! Integration tests for API endpoints.
//!
//! Every test drives the real router against its own in-memory SQLite
//! database, so no external services are needed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use usermgmt::api::{create_router, AppState};
use usermgmt::config::{Config, INVALID_CREDENTIALS_MESSAGE};
use usermgmt::infra::Database;

const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

// =============================================================================
// Test Helpers
// =============================================================================

async fn test_app() -> Router {
    let db = Database::open_migrated("sqlite::memory:")
        .await
        .expect("in-memory database");
    let config = Config::new("sqlite::memory:", TEST_SECRET);

    create_router(AppState::from_database(Arc::new(db), config))
}

fn registration(username: &str, email: &str, phone: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "phone": phone,
        "password": "SecurePass123!",
        "user_type": 3,
        "location": "Bengaluru",
        "team_name": "Platform",
        "skill": "Rust, SQL"
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get_with_token(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

async fn register_and_login(app: &Router) -> String {
    let (status, _) = post_json(
        app,
        "/users/register/",
        registration("asha.k", "asha@example.com", "9876543210"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        app,
        "/rest-auth/login/",
        json!({"email": "asha@example.com", "password": "SecurePass123!"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

// =============================================================================
// Root & Health Tests
// =============================================================================

#[tokio::test]
async fn test_root_endpoint() {
    let app = test_app().await;
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_healthy_database() {
    let app = test_app().await;
    let (status, body) = get_with_token(&app, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

// =============================================================================
// Registration Tests
// =============================================================================

#[tokio::test]
async fn test_register_returns_created_without_password() {
    let app = test_app().await;
    let (status, body) = post_json(
        &app,
        "/users/register/",
        registration("asha.k", "asha@EXAMPLE.com", "9876543210"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "asha.k");
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["phone"], "9876543210");
    assert_eq!(body["user_type"], 3);
    assert_eq!(body["location"], "Bengaluru");
    assert_eq!(body["team_name"], "Platform");
    assert_eq!(body["skill"], "Rust, SQL");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_defaults_to_candidate() {
    let app = test_app().await;
    let mut payload = registration("ravi", "ravi@example.com", "9000000001");
    payload.as_object_mut().unwrap().remove("user_type");

    let (status, body) = post_json(&app, "/users/register/", payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_type"], 2);
}

#[tokio::test]
async fn test_register_duplicate_email_is_rejected() {
    let app = test_app().await;
    post_json(
        &app,
        "/users/register/",
        registration("first", "dup@example.com", "9000000001"),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/users/register/",
        registration("second", "dup@example.com", "9000000002"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "UNIQUE_VIOLATION");
    assert_eq!(body["error"]["field"], "email");
    assert_eq!(
        body["error"]["message"],
        "user with this email address already exists."
    );
}

#[tokio::test]
async fn test_register_duplicate_username_and_phone_are_rejected() {
    let app = test_app().await;
    post_json(
        &app,
        "/users/register/",
        registration("taken", "one@example.com", "9000000001"),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/users/register/",
        registration("taken", "two@example.com", "9000000002"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "username");

    let (status, body) = post_json(
        &app,
        "/users/register/",
        registration("other", "three@example.com", "9000000001"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "phone");
}

#[tokio::test]
async fn test_register_rejects_missing_password() {
    let app = test_app().await;
    let mut payload = registration("asha.k", "asha@example.com", "9876543210");
    payload.as_object_mut().unwrap().remove("password");

    let (status, body) = post_json(&app, "/users/register/", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_rejects_empty_phone() {
    let app = test_app().await;
    let (status, body) = post_json(
        &app,
        "/users/register/",
        registration("asha.k", "asha@example.com", ""),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("phone"));
}

#[tokio::test]
async fn test_register_rejects_bad_username_characters() {
    let app = test_app().await;
    let (status, body) = post_json(
        &app,
        "/users/register/",
        registration("asha k!", "bad", "9876543210"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("username:"), "{}", message);
    assert!(message.contains("email:"), "{}", message);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = test_app().await;
    let (status, _) = post_json(
        &app,
        "/users/register/",
        registration("asha.k", "not-an-email", "9876543210"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Login / Logout Tests
// =============================================================================

#[tokio::test]
async fn test_login_returns_token_and_profile() {
    let app = test_app().await;
    post_json(
        &app,
        "/users/register/",
        registration("asha.k", "asha@example.com", "9876543210"),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/rest-auth/login/",
        json!({"email": "asha@example.com", "password": "SecurePass123!"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["email"], "asha@example.com");
    assert_eq!(body["user"]["username"], "asha.k");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("is_admin").is_none());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app().await;
    post_json(
        &app,
        "/users/register/",
        registration("asha.k", "asha@example.com", "9876543210"),
    )
    .await;

    let (wrong_status, wrong_body) = post_json(
        &app,
        "/rest-auth/login/",
        json!({"email": "asha@example.com", "password": "not-the-password"}),
    )
    .await;
    let (unknown_status, unknown_body) = post_json(
        &app,
        "/rest-auth/login/",
        json!({"email": "nobody@example.com", "password": "SecurePass123!"}),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"]["message"], INVALID_CREDENTIALS_MESSAGE);
}

#[tokio::test]
async fn test_logout_acknowledges() {
    let app = test_app().await;
    let (status, body) = post_json(&app, "/rest-auth/logout/", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detail"], "Successfully logged out.");
}

// =============================================================================
// Current User Tests
// =============================================================================

#[tokio::test]
async fn test_current_user_with_token() {
    let app = test_app().await;
    let token = register_and_login(&app).await;

    let (status, body) = get_with_token(&app, "/rest-auth/user/", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["phone"], "9876543210");
    assert_eq!(body["location"], "Bengaluru");
}

#[tokio::test]
async fn test_current_user_requires_token() {
    let app = test_app().await;

    let (status, body) = get_with_token(&app, "/rest-auth/user/", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = get_with_token(&app, "/rest-auth/user/", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app().await;
    let (status, body) = get_with_token(&app, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/users/register/").is_some());
    assert!(body["paths"].get("/rest-auth/login/").is_some());
}
