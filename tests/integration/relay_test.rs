//! Discord Relay Integration Tests
//!
//! Verifies the exact webhook body produced for a message and that delivery
//! failures never fail the invocation.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use tracing::instrument::WithSubscriber;

use crate::support::{binary_request, closed_url, message_data, relay_app, FakeDiscord, LogBuffer};

// ============================================================================
// Message text
// ============================================================================

#[tokio::test]
async fn test_plain_message_body() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let data = message_data("Hello", json!({}));

    relay_app(&discord.url).oneshot(binary_request(&data)).await.unwrap();

    assert_eq!(discord.received(), vec![json!({"content": "Hello"})]);
}

#[tokio::test]
async fn test_empty_message_defaults_to_world() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let data = message_data("", json!({}));

    relay_app(&discord.url).oneshot(binary_request(&data)).await.unwrap();

    assert_eq!(discord.received(), vec![json!({"content": "World"})]);
}

#[tokio::test]
async fn test_attributes_in_key_order() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let data = message_data("Hi", json!({"zone": "us-east1", "cluster": "prod"}));

    relay_app(&discord.url).oneshot(binary_request(&data)).await.unwrap();

    assert_eq!(
        discord.received(),
        vec![json!({"content": "Hi\ncluster:prod\nzone:us-east1"})]
    );
}

#[tokio::test]
async fn test_payload_attribute_is_expanded() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let payload = json!({
        "resourceType": "MASTER",
        "operation": "operation-1",
        "operationStartTime": "2024-05-01T10:00:00Z",
        "currentVersion": "1.28.3",
        "targetVersion": "1.29.1"
    })
    .to_string();
    let data = message_data("Upgrade", json!({"payload": payload}));

    relay_app(&discord.url).oneshot(binary_request(&data)).await.unwrap();

    let expected = format!(
        "Upgrade\npayload:{}\n\tResourceType:MASTER\n\tOperation:operation-1\n\tOperationStartTime:2024-05-01T10:00:00Z\n\tCurrentVersion:1.28.3\n\tTargetVersion:1.29.1",
        payload
    );
    assert_eq!(discord.received(), vec![json!({"content": expected})]);
}

#[tokio::test]
async fn test_array_payload_is_not_expanded() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let data = message_data("Upgrade", json!({"payload": "[\"a\"]"}));

    let response = relay_app(&discord.url).oneshot(binary_request(&data)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        discord.received(),
        vec![json!({"content": "Upgrade\npayload:[\"a\"]"})]
    );
}

#[tokio::test]
async fn test_malformed_payload_is_not_expanded() {
    let discord = FakeDiscord::start(StatusCode::NO_CONTENT).await;
    let data = message_data("Upgrade", json!({"payload": "{broken"}));

    let response = relay_app(&discord.url).oneshot(binary_request(&data)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        discord.received(),
        vec![json!({"content": "Upgrade\npayload:{broken"})]
    );
}

// ============================================================================
// Delivery failures
// ============================================================================

#[tokio::test]
async fn test_rejected_delivery_still_succeeds() {
    let discord = FakeDiscord::start(StatusCode::NOT_FOUND).await;
    let data = message_data("Hello", json!({}));
    let logs = LogBuffer::default();

    let response = relay_app(&discord.url)
        .oneshot(binary_request(&data))
        .with_subscriber(logs.subscriber())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // One attempt, no retries.
    assert_eq!(discord.received().len(), 1);
    let output = logs.contents();
    assert!(output.contains("ERROR"));
    assert!(output.contains("status=404"));
}

#[tokio::test]
async fn test_ok_instead_of_no_content_still_succeeds() {
    let discord = FakeDiscord::start(StatusCode::OK).await;
    let data = message_data("Hello", json!({}));

    let response = relay_app(&discord.url).oneshot(binary_request(&data)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(discord.received().len(), 1);
}

#[tokio::test]
async fn test_unreachable_webhook_still_succeeds() {
    let url = closed_url().await;
    let data = message_data("Hello", json!({}));
    let logs = LogBuffer::default();

    let response = relay_app(&url)
        .oneshot(binary_request(&data))
        .with_subscriber(logs.subscriber())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let output = logs.contents();
    assert!(output.contains("ERROR"));
    assert!(output.contains("Failed to send webhook request"));
}
