//! Discord Relay Function
//!
//! Formats a Pub/Sub message as chat text and forwards it to the configured
//! webhook channel.
//!
//! Text layout:
//!
//! ```text
//! <body, or "World" when empty>
//! <key>:<value>                  one line per attribute, ascending key order
//!     ResourceType:<v>           five tab-indented lines after the "payload"
//!     Operation:<v>              attribute when its value parses
//!     OperationStartTime:<v>
//!     CurrentVersion:<v>
//!     TargetVersion:<v>
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use pubsub_relay_core::{CloudEvent, PubSubMessage, ResourceOperationPayload};
use tracing::{error, info, warn};

use super::{decode_message, CloudEventFunction, FunctionError, SEND_DISCORD};
use crate::services::webhook::{DeliveryOutcome, DiscordMessage, WebhookChannel, WebhookChannelType};

/// Relays each Pub/Sub message to a single webhook channel.
pub struct NotificationRelay {
    channel: Arc<dyn WebhookChannel>,
}

impl NotificationRelay {
    pub fn new(channel: Arc<dyn WebhookChannel>) -> Self {
        Self { channel }
    }

    /// Build the notification text for a message.
    pub fn format_text(message: &PubSubMessage) -> String {
        let payload_details = message
            .payload_attribute()
            .and_then(|raw| match ResourceOperationPayload::parse(raw) {
                Ok(payload) => Some(payload),
                Err(e) => {
                    warn!(error = %e, "Skipping payload details");
                    None
                }
            });

        let mut text = message.text_or_default().into_owned();
        for (key, value) in &message.attributes {
            text.push_str(&format!("\n{}:{}", key, value));
            if key == ResourceOperationPayload::ATTRIBUTE_KEY {
                if let Some(ref payload) = payload_details {
                    for (label, field) in payload.labelled_fields() {
                        text.push_str(&format!("\n\t{}:{}", label, field));
                    }
                }
            }
        }
        text
    }

    /// Format and deliver one message, logging the outcome.
    pub async fn relay(&self, message: &PubSubMessage) -> DeliveryOutcome {
        let notification = DiscordMessage::new(Self::format_text(message));
        let outcome = self.channel.send(&notification).await;
        log_outcome(self.channel.channel_type(), &outcome);
        outcome
    }
}

fn log_outcome(channel: WebhookChannelType, outcome: &DeliveryOutcome) {
    match outcome {
        DeliveryOutcome::Delivered => info!(%channel, "Notification delivered"),
        DeliveryOutcome::Rejected { status, body } => {
            error!(%channel, status = *status, body = %body, "Notification rejected by webhook")
        }
        DeliveryOutcome::TransportFailed { reason } => {
            error!(%channel, reason = %reason, "Failed to send webhook request")
        }
        DeliveryOutcome::SerializationFailed { reason } => {
            error!(%channel, reason = %reason, "Failed to build webhook body")
        }
    }
}

#[async_trait]
impl CloudEventFunction for NotificationRelay {
    fn name(&self) -> &'static str {
        SEND_DISCORD
    }

    async fn handle(&self, event: &CloudEvent) -> Result<(), FunctionError> {
        let data = decode_message(event)?;
        info!(
            message_id = data.message.message_id.as_deref().unwrap_or_default(),
            attributes = ?data.message.attributes,
            "Received Pub/Sub message"
        );

        // Downstream failures end here; the outcome is already logged.
        self.relay(&data.message).await;
        Ok(())
    }
}
