//! Application State
//!
//! Shared, immutable state handed to every request: the resolved target
//! function.

use std::sync::Arc;

use tracing::info;

use crate::models::settings::RelayConfig;
use crate::services::functions::{CloudEventFunction, FunctionRegistry};
use crate::services::webhook::DiscordChannel;
use crate::utils::error::AppResult;

/// Application state shared by the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    function: Arc<dyn CloudEventFunction>,
}

impl AppState {
    pub fn new(function: Arc<dyn CloudEventFunction>) -> Self {
        Self { function }
    }

    /// Build the registry from a validated configuration and resolve the target.
    pub fn from_config(config: &RelayConfig) -> AppResult<Self> {
        let registry = if config.webhook_url.is_empty() {
            FunctionRegistry::new()
        } else {
            let channel = DiscordChannel::new(config.webhook_url.clone(), &config.outbound)?;
            FunctionRegistry::with_channel(Arc::new(channel))
        };

        let function = registry.resolve(&config.function_target)?;
        info!(
            function = function.name(),
            registered = ?registry.names(),
            "Function target resolved"
        );
        Ok(Self::new(function))
    }

    pub fn function(&self) -> &Arc<dyn CloudEventFunction> {
        &self.function
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("function", &self.function.name())
            .finish()
    }
}
