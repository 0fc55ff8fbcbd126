//! CloudEvent Envelope
//!
//! A minimal CloudEvents 1.0 representation: the required context attributes,
//! the optional ones the relay logs, and the opaque data bytes. Functions
//! never look at the envelope beyond [`CloudEvent::data_as`].
//!
//! Structured-mode JSON (`application/cloudevents+json`) is parsed here so the
//! HTTP layer only has to pick a content mode.

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::json;

/// The only CloudEvents spec version accepted.
pub const SPEC_VERSION: &str = "1.0";

/// Event type emitted by Pub/Sub for a published message.
pub const PUBSUB_MESSAGE_PUBLISHED: &str = "google.cloud.pubsub.topic.v1.messagePublished";

/// Default content type for structured-mode data.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// An inbound CloudEvent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudEvent {
    pub id: String,
    pub source: String,
    /// The `type` context attribute.
    pub ty: String,
    pub specversion: String,
    pub subject: Option<String>,
    pub time: Option<String>,
    pub datacontenttype: Option<String>,
    pub data: Option<Bytes>,
}

impl CloudEvent {
    /// Create an event with the required attributes and no data.
    pub fn new(id: impl Into<String>, source: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            ty: ty.into(),
            specversion: SPEC_VERSION.to_string(),
            subject: None,
            time: None,
            datacontenttype: None,
            data: None,
        }
    }

    pub fn with_data(mut self, content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.datacontenttype = Some(content_type.into());
        self.data = Some(data.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Decode the event data as a JSON object into `T`.
    ///
    /// An event without data, or with `null` data, decodes to `T::default()`.
    /// Any other non-object document is a decode error.
    pub fn data_as<T>(&self) -> CoreResult<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.data.as_deref() {
            None | Some([]) => Ok(T::default()),
            Some(bytes) => json::from_object_slice(bytes)
                .map_err(|e| CoreError::decode(format!("event {}: {}", self.id, e))),
        }
    }

    /// Check the required context attributes.
    pub fn validate(&self) -> CoreResult<()> {
        for (name, value) in [
            ("id", &self.id),
            ("source", &self.source),
            ("type", &self.ty),
            ("specversion", &self.specversion),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::invalid_event(format!(
                    "missing required attribute '{}'",
                    name
                )));
            }
        }
        if self.specversion != SPEC_VERSION {
            return Err(CoreError::invalid_event(format!(
                "unsupported specversion '{}'",
                self.specversion
            )));
        }
        Ok(())
    }

    /// Parse a structured-mode (JSON format) event.
    pub fn from_structured(body: &[u8]) -> CoreResult<Self> {
        let raw: StructuredEvent = serde_json::from_slice(body)
            .map_err(|e| CoreError::invalid_event(format!("structured event: {}", e)))?;
        let datacontenttype = raw
            .datacontenttype
            .unwrap_or_else(|| JSON_CONTENT_TYPE.to_string());

        let data = match (raw.data, raw.data_base64) {
            (Some(_), Some(_)) => {
                return Err(CoreError::invalid_event(
                    "both 'data' and 'data_base64' are present",
                ))
            }
            (Some(Value::String(text)), None) if !is_json_content_type(&datacontenttype) => {
                Some(Bytes::from(text))
            }
            (Some(value), None) => Some(Bytes::from(serde_json::to_vec(&value)?)),
            (None, Some(encoded)) => Some(Bytes::from(STANDARD.decode(encoded.as_bytes()).map_err(
                |e| CoreError::invalid_event(format!("invalid data_base64: {}", e)),
            )?)),
            (None, None) => None,
        };

        let event = Self {
            id: raw.id,
            source: raw.source,
            ty: raw.ty,
            specversion: raw.specversion,
            subject: raw.subject,
            time: raw.time,
            datacontenttype: Some(datacontenttype),
            data,
        };
        event.validate()?;
        Ok(event)
    }
}

/// Whether a media type carries JSON (`application/json`, `text/json`, `*+json`).
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence == "text/json" || essence.ends_with("+json")
}

#[derive(Deserialize)]
struct StructuredEvent {
    #[serde(default)]
    id: String,
    #[serde(default)]
    source: String,
    #[serde(rename = "type", default)]
    ty: String,
    #[serde(default)]
    specversion: String,
    subject: Option<String>,
    time: Option<String>,
    datacontenttype: Option<String>,
    data: Option<Value>,
    data_base64: Option<String>,
}
