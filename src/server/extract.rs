//! CloudEvent Extraction
//!
//! Turns an HTTP request into a [`CloudEvent`]. Three request shapes are
//! accepted:
//!
//! - structured mode: `Content-Type: application/cloudevents+json`
//! - binary mode: `ce-*` headers, body is the event data
//! - a raw Pub/Sub push body (`{"message": {...}, "subscription": ...}`),
//!   wrapped as a `messagePublished` event

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use bytes::Bytes;
use pubsub_relay_core::cloud_event::JSON_CONTENT_TYPE;
use pubsub_relay_core::json::{from_object_slice, object_or_null};
use pubsub_relay_core::{CloudEvent, PUBSUB_MESSAGE_PUBLISHED};
use serde::Deserialize;

use super::error::HostError;

/// Media type of a structured-mode CloudEvent.
pub const STRUCTURED_CONTENT_TYPE: &str = "application/cloudevents+json";

/// Source prefix for events synthesized from push bodies.
pub const PUBSUB_SERVICE: &str = "//pubsub.googleapis.com/";

/// Build a CloudEvent from request headers and body.
pub fn cloud_event_from_request(headers: &HeaderMap, body: Bytes) -> Result<CloudEvent, HostError> {
    let content_type = header_value(headers, CONTENT_TYPE.as_str())?;

    if content_type.as_deref().is_some_and(is_structured) {
        return Ok(CloudEvent::from_structured(&body)?);
    }
    if headers.contains_key("ce-id") || headers.contains_key("ce-specversion") {
        return from_binary(headers, content_type, body);
    }
    from_push(body)
}

fn is_structured(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(STRUCTURED_CONTENT_TYPE))
}

fn header_value(headers: &HeaderMap, name: &str) -> Result<Option<String>, HostError> {
    headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map(str::to_string)
                .map_err(|_| HostError::InvalidEvent(format!("header '{}' is not valid UTF-8", name)))
        })
        .transpose()
}

fn required_header(headers: &HeaderMap, name: &str) -> Result<String, HostError> {
    header_value(headers, name)?
        .ok_or_else(|| HostError::InvalidEvent(format!("missing header '{}'", name)))
}

fn from_binary(
    headers: &HeaderMap,
    content_type: Option<String>,
    body: Bytes,
) -> Result<CloudEvent, HostError> {
    let mut event = CloudEvent::new(
        required_header(headers, "ce-id")?,
        required_header(headers, "ce-source")?,
        required_header(headers, "ce-type")?,
    );
    event.specversion = required_header(headers, "ce-specversion")?;
    event.subject = header_value(headers, "ce-subject")?;
    event.time = header_value(headers, "ce-time")?;
    event.datacontenttype = content_type;
    event.data = if body.is_empty() { None } else { Some(body) };
    event.validate()?;
    Ok(event)
}

#[derive(Default, Deserialize)]
struct PushEnvelope {
    #[serde(default, deserialize_with = "object_or_null")]
    message: Option<PushMessage>,
    subscription: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PushMessage {
    #[serde(alias = "message_id")]
    message_id: Option<String>,
    #[serde(alias = "publish_time")]
    publish_time: Option<String>,
}

fn from_push(body: Bytes) -> Result<CloudEvent, HostError> {
    let envelope: PushEnvelope = from_object_slice(&body).map_err(|e| {
        HostError::InvalidEvent(format!("not a CloudEvent or Pub/Sub push body: {}", e))
    })?;
    let message = envelope.message.ok_or_else(|| {
        HostError::InvalidEvent("not a CloudEvent or Pub/Sub push body: no 'message'".to_string())
    })?;

    let id = message
        .message_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let source = match envelope.subscription {
        Some(subscription) => format!("{}{}", PUBSUB_SERVICE, subscription),
        None => PUBSUB_SERVICE.to_string(),
    };
    let time = message
        .publish_time
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

    Ok(CloudEvent::new(id, source, PUBSUB_MESSAGE_PUBLISHED)
        .with_time(time)
        .with_data(JSON_CONTENT_TYPE, body))
}
