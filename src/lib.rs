//! PubSub Relay - Rust Backend Library
//!
//! Hosts CloudEvent functions behind an HTTP endpoint. It includes:
//! - The CloudEvent HTTP host (binary, structured and Pub/Sub push requests)
//! - The `sendDiscord` and `HelloPubSub` functions
//! - Webhook delivery to Discord
//! - Configuration loading and logging setup

pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::settings::{OutboundConfig, RelayConfig, RelayConfigUpdate};
pub use server::{build_router, serve, HostError};
pub use services::functions::{
    CloudEventFunction, FunctionError, FunctionRegistry, HelloPubSub, NotificationRelay,
    HELLO_PUBSUB, SEND_DISCORD,
};
pub use services::webhook::{DeliveryOutcome, DiscordChannel, DiscordMessage, WebhookChannel};
pub use state::AppState;
pub use storage::config::ConfigService;
pub use utils::error::{AppError, AppResult};
