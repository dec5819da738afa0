//! Identity HTTP tests: registration, login, profile and the auth guard

use super::{build_test_router, get_json, post_json, post_raw, TestAppState};
use axum::http::StatusCode;
use lms_core::domain::Role;
use serde_json::json;

#[tokio::test]
async fn test_register_then_login() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    let (status, body) = post_json(
        &app,
        "/register",
        &json!({"name": "Ada", "email": "ada@example.com", "password": "secret123"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["role"], "student");
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = post_json(
        &app,
        "/login",
        &json!({"email": "ada@example.com", "password": "secret123"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["email"], "ada@example.com");

    let token = body["data"]["access_token"].as_str().unwrap().to_string();
    let (status, body) = get_json(&app, "/profile", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User profile retrieved successfully");
    assert_eq!(body["data"]["name"], "Ada");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let state = TestAppState::new();
    state
        .db
        .seed_user("Ada", "ada@example.com", Role::Student)
        .await;
    let app = build_test_router(state);

    let (status, body) = post_json(
        &app,
        "/register",
        &json!({"name": "Ada", "email": "ada@example.com", "password": "secret123"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["statusCode"], 409);
    assert_eq!(body["message"], "User already exists!");
}

#[tokio::test]
async fn test_register_invalid_email_is_bad_request() {
    let app = build_test_router(TestAppState::new());

    let (status, body) = post_json(
        &app,
        "/register",
        &json!({"name": "Ada", "email": "not-an-email", "password": "secret123"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let app = build_test_router(TestAppState::new());
    post_json(
        &app,
        "/register",
        &json!({"name": "Ada", "email": "ada@example.com", "password": "secret123"}),
        None,
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/login",
        &json!({"email": "ada@example.com", "password": "wrong-password"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, _) = post_json(
        &app,
        "/login",
        &json!({"email": "nobody@example.com", "password": "secret123"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = build_test_router(TestAppState::new());

    let (status, body) = get_json(&app, "/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing authorization token");

    let (status, body) = get_json(&app, "/courses", Some("garbage.token.value")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = build_test_router(TestAppState::new());

    let (status, body) = post_raw(&app, "/login", "{\"email\": ", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn test_unknown_route_returns_envelope() {
    let app = build_test_router(TestAppState::new());

    let (status, body) = get_json(&app, "/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "Not found");
}

#[tokio::test]
async fn test_health_is_public() {
    let app = build_test_router(TestAppState::new());

    let (status, _) = get_json(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_json(&app, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
}
