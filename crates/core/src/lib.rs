//! PubSub Relay Core
//!
//! Event envelope, Pub/Sub message model and error types for the PubSub Relay
//! workspace. This crate has no dependency on HTTP, async runtimes or
//! application configuration.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `cloud_event` - CloudEvents 1.0 envelope and structured-mode parsing
//! - `json` - Object-only JSON decoding
//! - `pubsub` - Pub/Sub message data and the resource operation payload

pub mod cloud_event;
pub mod error;
pub mod json;
pub mod pubsub;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Event Envelope ─────────────────────────────────────────────────────
pub use cloud_event::{CloudEvent, PUBSUB_MESSAGE_PUBLISHED};

// ── Pub/Sub Model ──────────────────────────────────────────────────────
pub use pubsub::{MessagePublishedData, PubSubMessage, ResourceOperationPayload, DEFAULT_TEXT};
