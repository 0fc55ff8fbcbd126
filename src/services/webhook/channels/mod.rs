//! Webhook Channel Trait
//!
//! Defines the async trait that webhook channel implementations satisfy,
//! plus the channel modules.

pub mod discord;

use async_trait::async_trait;

use super::types::{DeliveryOutcome, DiscordMessage, WebhookChannelType, WebhookError};

/// Async trait for webhook channel implementations.
///
/// A channel owns its destination and HTTP client. `send` makes exactly one
/// attempt and reports the result as a [`DeliveryOutcome`]; it never fails.
#[async_trait]
pub trait WebhookChannel: Send + Sync {
    /// Channel type identifier.
    fn channel_type(&self) -> WebhookChannelType;

    /// Deliver a message through this channel.
    async fn send(&self, message: &DiscordMessage) -> DeliveryOutcome;

    /// Format the message into the request body.
    fn format_message(&self, message: &DiscordMessage) -> Result<String, WebhookError>;
}
