//! Webhook Core Types
//!
//! Outbound message, delivery outcome and error types for webhook channels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported notification channel types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WebhookChannelType {
    Discord,
}

impl fmt::Display for WebhookChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discord => write!(f, "discord"),
        }
    }
}

/// Discord execute-webhook body. Only plain content is sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscordMessage {
    pub content: String,
}

impl DiscordMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Result of a single delivery attempt.
///
/// Channels report problems through this value instead of failing, so the
/// invoking function always completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The endpoint answered 204 No Content
    Delivered,
    /// The endpoint answered with any other status
    Rejected { status: u16, body: String },
    /// The request could not be sent or no response arrived
    TransportFailed { reason: String },
    /// The body could not be built; nothing was sent
    SerializationFailed { reason: String },
}

/// Webhook-specific errors
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<reqwest::Error> for WebhookError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
