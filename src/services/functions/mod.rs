//! CloudEvent Functions
//!
//! The functions the host can serve, the trait they implement, and the
//! registry that maps a target name to one of them.
//!
//! Only a decode failure of the inbound event is reported back to the host.
//! Everything downstream of decoding is logged and swallowed.

pub mod hello_pubsub;
pub mod registry;
pub mod send_discord;

use async_trait::async_trait;
use pubsub_relay_core::{CloudEvent, CoreError, MessagePublishedData};

pub use hello_pubsub::HelloPubSub;
pub use registry::FunctionRegistry;
pub use send_discord::NotificationRelay;

/// Registered name of the Discord relay function.
pub const SEND_DISCORD: &str = "sendDiscord";

/// Registered name of the greeting function.
pub const HELLO_PUBSUB: &str = "HelloPubSub";

/// A function invoked once per inbound CloudEvent.
#[async_trait]
pub trait CloudEventFunction: Send + Sync {
    /// Registered name, used as the function target.
    fn name(&self) -> &'static str;

    /// Handle one event. `Err` means the host should treat the invocation as failed.
    async fn handle(&self, event: &CloudEvent) -> Result<(), FunctionError>;
}

/// Failure reported to the host.
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("failed to decode event data: {0}")]
    Decode(#[source] CoreError),
}

/// Decode the event data into a Pub/Sub message envelope.
pub fn decode_message(event: &CloudEvent) -> Result<MessagePublishedData, FunctionError> {
    event.data_as::<MessagePublishedData>().map_err(FunctionError::Decode)
}
