//! Webhook Notification System
//!
//! Outbound side of the relay: a channel trait, the Discord implementation
//! and the HTTP client factory they share.

pub mod channels;
pub mod http_client;
pub mod types;

pub use channels::discord::DiscordChannel;
pub use channels::WebhookChannel;
pub use types::*;
