//! Pub/Sub Message Model
//!
//! Wire types for the `google.cloud.pubsub.topic.v1.messagePublished` event
//! data, plus the resource operation document that publishers embed in the
//! `payload` attribute.
//!
//! Deserialization is lenient in the same places the Pub/Sub push format is:
//! absent or `null` data and attributes decode as empty. Documents must be
//! JSON objects; arrays are never read positionally.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::json::{self, object_or_null};

/// Text used when a message arrives with an empty body.
pub const DEFAULT_TEXT: &str = "World";

/// Event data carried by a Pub/Sub "message published" CloudEvent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagePublishedData {
    #[serde(default, deserialize_with = "object_or_null")]
    pub message: PubSubMessage,
    /// Full subscription resource name, when the push endpoint includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
}

/// A single Pub/Sub message.
///
/// `data` is base64 on the wire and raw bytes here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PubSubMessage {
    #[serde(default, with = "base64_data")]
    pub data: Vec<u8>,
    /// Attributes in ascending key order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, alias = "message_id", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, alias = "publish_time", skip_serializing_if = "Option::is_none")]
    pub publish_time: Option<String>,
}

impl PubSubMessage {
    /// Create a message from a body and attribute pairs.
    pub fn new<K, V>(data: impl Into<Vec<u8>>, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            data: data.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            message_id: None,
            publish_time: None,
        }
    }

    /// The message body as text. Invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// The message body as text, or [`DEFAULT_TEXT`] when the body is empty.
    pub fn text_or_default(&self) -> Cow<'_, str> {
        if self.data.is_empty() {
            Cow::Borrowed(DEFAULT_TEXT)
        } else {
            self.text()
        }
    }

    /// The raw `payload` attribute, if the publisher attached one.
    pub fn payload_attribute(&self) -> Option<&str> {
        self.attributes
            .get(ResourceOperationPayload::ATTRIBUTE_KEY)
            .map(String::as_str)
    }
}

/// Resource operation details published in the `payload` attribute.
///
/// Fields missing from the document are left empty; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceOperationPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operation_start_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_version: String,
}

impl ResourceOperationPayload {
    /// Attribute key that carries the JSON document.
    pub const ATTRIBUTE_KEY: &'static str = "payload";

    /// Parse the attribute value, which must be a JSON object.
    /// A bare `null` document yields empty fields.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        json::from_object_slice(raw.as_bytes())
            .map_err(|e| CoreError::payload_parse(e.to_string()))
    }

    /// Labelled fields in display order.
    pub fn labelled_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("ResourceType", self.resource_type.as_str()),
            ("Operation", self.operation.as_str()),
            ("OperationStartTime", self.operation_start_time.as_str()),
            ("CurrentVersion", self.current_version.as_str()),
            ("TargetVersion", self.target_version.as_str()),
        ]
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

mod base64_data {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| de::Error::custom(format!("invalid base64 data: {}", e))),
            None => Ok(Vec::new()),
        }
    }
}
