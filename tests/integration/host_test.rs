//! Host Integration Tests
//!
//! Drives the router with each accepted request shape and checks status codes:
//! - binary, structured and push requests all reach the function
//! - malformed events are rejected with 400 before any delivery
//! - undecodable event data fails the invocation with 500

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::support::{
    binary_request, hello_app, message_data, push_request, relay_app, structured_request,
    FakeDiscord,
};

// ============================================================================
// Accepted request shapes
// ============================================================================

#[tokio::test]
async fn test_binary_mode_is_relayed() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let data = message_data("Hello", json!({"env": "prod"}));

    let response = relay_app(&discord.url).oneshot(binary_request(&data)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(discord.received(), vec![json!({"content": "Hello\nenv:prod"})]);
}

#[tokio::test]
async fn test_structured_mode_is_relayed() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let data = message_data("Hello", json!({"env": "prod"}));

    let response = relay_app(&discord.url)
        .oneshot(structured_request(&data))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(discord.received(), vec![json!({"content": "Hello\nenv:prod"})]);
}

#[tokio::test]
async fn test_push_body_is_relayed() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let data = message_data("Hello", json!({"env": "prod"}));

    let response = relay_app(&discord.url).oneshot(push_request(&data)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(discord.received(), vec![json!({"content": "Hello\nenv:prod"})]);
}

#[tokio::test]
async fn test_hello_pubsub_needs_no_webhook() {
    let data = message_data("Gopher", json!({}));
    let response = hello_app().oneshot(binary_request(&data)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Rejections
// ============================================================================

#[tokio::test]
async fn test_missing_required_attribute_is_400() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("ce-id", "1001")
        .header("ce-specversion", "1.0")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = relay_app(&discord.url).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(discord.received().is_empty());
}

#[tokio::test]
async fn test_non_event_body_is_400() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from("hello"))
        .unwrap();

    let response = relay_app(&discord.url).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(discord.received().is_empty());
}

#[tokio::test]
async fn test_undecodable_data_is_500_without_delivery() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let data = json!({"message": {"data": "%%% not base64 %%%"}});

    let response = relay_app(&discord.url).oneshot(binary_request(&data)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(discord.received().is_empty());
}

#[tokio::test]
async fn test_array_data_is_500_without_delivery() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let data = json!([{"data": "SGk=", "attributes": {"k": "v"}}]);

    let response = relay_app(&discord.url).oneshot(binary_request(&data)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(discord.received().is_empty());
}

#[tokio::test]
async fn test_non_json_data_is_500_without_delivery() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("ce-id", "1001")
        .header("ce-source", "//pubsub.googleapis.com/projects/demo/topics/events")
        .header("ce-type", pubsub_relay_core::PUBSUB_MESSAGE_PUBLISHED)
        .header("ce-specversion", "1.0")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let response = relay_app(&discord.url).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(discord.received().is_empty());
}
