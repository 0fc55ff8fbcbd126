//! Function Registry
//!
//! Maps function target names to handler objects. The host resolves its
//! configured target once at startup.

use std::collections::HashMap;
use std::sync::Arc;

use super::{CloudEventFunction, HelloPubSub, NotificationRelay};
use crate::services::webhook::WebhookChannel;
use crate::utils::error::{AppError, AppResult};

/// Registry of the functions this binary can serve.
pub struct FunctionRegistry {
    functions: HashMap<&'static str, Arc<dyn CloudEventFunction>>,
}

impl FunctionRegistry {
    /// Registry holding only the functions that need no outbound channel.
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };
        registry.register(Arc::new(HelloPubSub));
        registry
    }

    /// Registry with the Discord relay registered on `channel`.
    pub fn with_channel(channel: Arc<dyn WebhookChannel>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(NotificationRelay::new(channel)));
        registry
    }

    /// Register a function under its own name, replacing any previous one.
    pub fn register(&mut self, function: Arc<dyn CloudEventFunction>) {
        self.functions.insert(function.name(), function);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CloudEventFunction>> {
        self.functions.get(name).cloned()
    }

    /// Look up the configured target, failing with the available names.
    pub fn resolve(&self, name: &str) -> AppResult<Arc<dyn CloudEventFunction>> {
        self.get(name).ok_or_else(|| {
            AppError::not_found(format!(
                "Function '{}' is not registered (available: {})",
                name,
                self.names().join(", ")
            ))
        })
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}
