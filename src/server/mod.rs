//! CloudEvent HTTP Host
//!
//! Accepts CloudEvents over HTTP POST on any path and dispatches them to the
//! configured function. Responds 200 when the function returns normally,
//! 400 when the request is not an event, 500 when the function fails.

pub mod error;
pub mod extract;
pub mod routes;

use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

pub use error::HostError;
pub use extract::cloud_event_from_request;

use crate::state::AppState;
use crate::utils::error::AppResult;

/// Build the router: every POST goes to the target function.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(routes::receive_event))
        .route("/*path", post(routes::receive_event))
        .with_state(state)
}

/// Serve on `listener` until ctrl-c or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> AppResult<()> {
    let addr = listener.local_addr()?;
    info!(%addr, function = state.function().name(), "Listening for CloudEvents");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("Shutdown signal received");
}
