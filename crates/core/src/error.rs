//! Core Error Types
//!
//! Defines the error types shared by every crate in the PubSub Relay workspace.
//! They depend only on thiserror + serde_json so the core crate stays free of
//! HTTP and runtime dependencies.
//!
//! The application crate adds its own error enums for configuration, webhook
//! delivery and the HTTP ingress.

use thiserror::Error;

/// Core error type for the PubSub Relay workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The event data could not be interpreted as the expected message shape.
    ///
    /// This is the only failure a function reports back to the host.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The `payload` attribute is not a JSON object of the expected shape.
    #[error("Payload parse error: {0}")]
    PayloadParse(String),

    /// The inbound request is not a well-formed CloudEvent.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a payload parse error
    pub fn payload_parse(msg: impl Into<String>) -> Self {
        Self::PayloadParse(msg.into())
    }

    /// Create an invalid event error
    pub fn invalid_event(msg: impl Into<String>) -> Self {
        Self::InvalidEvent(msg.into())
    }
}
