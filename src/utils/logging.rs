//! Logging Setup
//!
//! Installs the global `tracing` subscriber for the binary. `RUST_LOG` wins
//! over the configured level when it is set.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::utils::error::{AppError, AppResult};

/// Build the filter from `RUST_LOG`, falling back to `level`, then to `info`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the fmt subscriber. Fails if a global subscriber already exists.
pub fn init_tracing(level: &str) -> AppResult<()> {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| AppError::internal(format!("failed to install tracing subscriber: {}", e)))
}
