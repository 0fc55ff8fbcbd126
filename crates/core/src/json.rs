//! JSON Object Decoding
//!
//! Derived `Deserialize` impls for structs also accept a JSON array and fill
//! fields by position. Every document the relay decodes is a JSON object, so
//! decoding goes through [`object_or_null`], which accepts an object or
//! `null` (yielding `T::default()`) and rejects everything else.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Deserialize `T` from a JSON object, or `T::default()` from `null`.
///
/// Usable directly or as a `#[serde(deserialize_with)]` field helper.
pub fn object_or_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(T::default()),
        value @ Value::Object(_) => serde_json::from_value(value).map_err(de::Error::custom),
        other => Err(de::Error::custom(format!(
            "expected a JSON object, found {}",
            kind(&other)
        ))),
    }
}

/// Parse `bytes` as JSON and decode it with [`object_or_null`].
pub fn from_object_slice<T>(bytes: &[u8]) -> serde_json::Result<T>
where
    T: DeserializeOwned + Default,
{
    let value: Value = serde_json::from_slice(bytes)?;
    object_or_null(value)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
