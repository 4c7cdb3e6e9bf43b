//! Integration tests for user authentication.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_authenticate_registers_then_returns_same_user() {
    // Arrange
    let test = common::build_test_app();

    // Act
    let first = common::login(&test.router, "vova").await;
    let second = common::login(&test.router, "vova").await;
    let other = common::login(&test.router, "alice").await;

    // Assert
    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[tokio::test]
async fn test_authenticate_blank_name_returns_400() {
    let test = common::build_test_app();

    let (status, json) =
        common::post_json(&test.router, "/api/v1/users", &json!({ "name": "  " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_registration_is_logged_with_user_context() {
    // Arrange
    let test = common::build_test_app();

    // Act
    let id = common::login(&test.router, "vova").await;
    test.shutdown();

    // Assert
    let events = test.logs.items();
    let registered = events
        .iter()
        .find(|e| e.message == "user registered")
        .unwrap();
    assert_eq!(
        registered.context.user_id.map(|u| u.to_string()),
        Some(id)
    );
    assert!(registered.context.request_id.is_some());
}
