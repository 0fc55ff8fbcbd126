//! Error types for the CloudEvent ingress.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pubsub_relay_core::CoreError;
use thiserror::Error;

use crate::services::functions::FunctionError;

/// Errors that end an inbound request.
#[derive(Debug, Error)]
pub enum HostError {
    /// The request is not a CloudEvent (nor a Pub/Sub push message).
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    /// The function reported a failure.
    #[error("function failed: {0}")]
    Function(#[from] FunctionError),
}

impl HostError {
    /// - InvalidEvent: 400 Bad Request
    /// - Function: 500 Internal Server Error, so the push subscription redelivers
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEvent(_) => StatusCode::BAD_REQUEST,
            Self::Function(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for HostError {
    fn from(err: CoreError) -> Self {
        Self::InvalidEvent(err.to_string())
    }
}

impl IntoResponse for HostError {
    fn into_response(self) -> Response {
        // Details stay in the log.
        let body = match &self {
            Self::InvalidEvent(_) => "Invalid CloudEvent",
            Self::Function(_) => "Function execution failed",
        };
        (self.status_code(), body).into_response()
    }
}
