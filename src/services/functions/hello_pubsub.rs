//! Greeting Function
//!
//! Logs `Hello, <name>!` for each Pub/Sub message, where the name is the
//! message body. Makes no outbound calls.

use async_trait::async_trait;
use pubsub_relay_core::{CloudEvent, PubSubMessage};
use tracing::info;

use super::{decode_message, CloudEventFunction, FunctionError, HELLO_PUBSUB};

#[derive(Debug, Default)]
pub struct HelloPubSub;

impl HelloPubSub {
    pub fn greeting(message: &PubSubMessage) -> String {
        format!("Hello, {}!", message.text_or_default())
    }
}

#[async_trait]
impl CloudEventFunction for HelloPubSub {
    fn name(&self) -> &'static str {
        HELLO_PUBSUB
    }

    async fn handle(&self, event: &CloudEvent) -> Result<(), FunctionError> {
        let data = decode_message(event)?;
        info!("{}", Self::greeting(&data.message));
        Ok(())
    }
}
