//! Services
//!
//! Business logic: the CloudEvent functions and the webhook channels they
//! deliver through.

pub mod functions;
pub mod webhook;
