//! Request handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use tracing::{error, info_span, warn, Instrument};

use super::error::HostError;
use super::extract::cloud_event_from_request;
use crate::state::AppState;

/// Receive one CloudEvent and invoke the target function with it.
pub async fn receive_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, HostError> {
    let event = cloud_event_from_request(&headers, body).map_err(|e| {
        warn!(error = %e, "Rejected inbound request");
        e
    })?;

    let function = state.function();
    let span = info_span!(
        "invocation",
        function = function.name(),
        event_id = %event.id,
        event_type = %event.ty,
    );

    async {
        function.handle(&event).await.map_err(|e| {
            error!(error = %e, "Function returned an error");
            HostError::from(e)
        })?;
        Ok(StatusCode::OK)
    }
    .instrument(span)
    .await
}
