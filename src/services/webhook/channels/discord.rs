//! Discord Webhook Channel
//!
//! Sends notifications via a Discord execute-webhook URL using the plain
//! `{"content": ...}` body.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use super::WebhookChannel;
use crate::models::settings::OutboundConfig;
use crate::services::webhook::http_client::build_http_client;
use crate::services::webhook::types::*;

/// Discord execute-webhook integration.
///
/// Discord answers a successful execute request with `204 No Content`; any
/// other status counts as a rejection.
/// Webhook URL format: `https://discord.com/api/webhooks/<id>/<token>`
pub struct DiscordChannel {
    client: reqwest::Client,
    url: String,
}

impl DiscordChannel {
    pub fn new(url: impl Into<String>, outbound: &OutboundConfig) -> Result<Self, WebhookError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(WebhookError::InvalidConfig(
                "Discord webhook URL not configured".to_string(),
            ));
        }
        Ok(Self {
            client: build_http_client(outbound)?,
            url,
        })
    }
}

#[async_trait]
impl WebhookChannel for DiscordChannel {
    fn channel_type(&self) -> WebhookChannelType {
        WebhookChannelType::Discord
    }

    async fn send(&self, message: &DiscordMessage) -> DeliveryOutcome {
        let body = match self.format_message(message) {
            Ok(body) => body,
            Err(e) => {
                return DeliveryOutcome::SerializationFailed {
                    reason: e.to_string(),
                }
            }
        };

        let response = match self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return DeliveryOutcome::TransportFailed {
                    reason: e.to_string(),
                }
            }
        };

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            DeliveryOutcome::Delivered
        } else {
            DeliveryOutcome::Rejected {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }
        }
    }

    fn format_message(&self, message: &DiscordMessage) -> Result<String, WebhookError> {
        Ok(serde_json::to_string(message)?)
    }
}
