//! Settings Models
//!
//! Relay configuration and the partial update applied from CLI flags and
//! environment variables.

use serde::{Deserialize, Serialize};

use crate::services::functions::{HELLO_PUBSUB, SEND_DISCORD};

/// Relay configuration, optionally stored in a JSON file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayConfig {
    /// Registered function served by the host: "sendDiscord" or "HelloPubSub"
    #[serde(default = "default_function_target")]
    pub function_target: String,
    /// Listen address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Discord webhook destination. Required when serving "sendDiscord".
    #[serde(default)]
    pub webhook_url: String,
    /// Outbound HTTP client settings
    #[serde(default)]
    pub outbound: OutboundConfig,
    /// Log filter directive (e.g. "info", "pubsub_relay=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Outbound HTTP client settings. Both unset by default, which leaves the
/// networking stack's own defaults in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboundConfig {
    /// Proxy URL (http, https or socks5) for the webhook request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    /// Whole-request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_function_target() -> String {
    SEND_DISCORD.to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            function_target: default_function_target(),
            bind_address: default_bind_address(),
            port: default_port(),
            webhook_url: String::new(),
            outbound: OutboundConfig::default(),
            log_level: default_log_level(),
        }
    }
}

/// Partial configuration update (CLI flags / environment)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayConfigUpdate {
    pub function_target: Option<String>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub webhook_url: Option<String>,
    pub proxy_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl RelayConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: RelayConfigUpdate) {
        if let Some(target) = update.function_target {
            self.function_target = target;
        }
        if let Some(address) = update.bind_address {
            self.bind_address = address;
        }
        if let Some(port) = update.port {
            self.port = port;
        }
        if let Some(url) = update.webhook_url {
            self.webhook_url = url;
        }
        if let Some(proxy) = update.proxy_url {
            self.outbound.proxy_url = Some(proxy);
        }
        if let Some(secs) = update.timeout_secs {
            self.outbound.timeout_secs = Some(secs);
        }
        if let Some(level) = update.log_level {
            self.log_level = level;
        }
    }

    /// Whether the configured target posts to the webhook
    pub fn needs_webhook(&self) -> bool {
        self.function_target == SEND_DISCORD
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if ![SEND_DISCORD, HELLO_PUBSUB].contains(&self.function_target.as_str()) {
            return Err(format!(
                "Invalid function_target: {}. Must be '{}' or '{}'",
                self.function_target, SEND_DISCORD, HELLO_PUBSUB
            ));
        }

        if self.bind_address.trim().is_empty() {
            return Err("bind_address cannot be empty".to_string());
        }

        if self.needs_webhook() && self.webhook_url.trim().is_empty() {
            return Err(format!("webhook_url is required for '{}'", SEND_DISCORD));
        }
        if !self.webhook_url.is_empty() {
            validate_http_url("webhook_url", &self.webhook_url)?;
        }

        if let Some(ref proxy) = self.outbound.proxy_url {
            let parsed = url::Url::parse(proxy)
                .map_err(|e| format!("Invalid proxy_url {}: {}", proxy, e))?;
            if !["http", "https", "socks5", "socks5h"].contains(&parsed.scheme()) {
                return Err(format!("Unsupported proxy scheme: {}", parsed.scheme()));
            }
        }

        if self.outbound.timeout_secs == Some(0) {
            return Err("timeout_secs must be at least 1 second".to_string());
        }

        if self.log_level.trim().is_empty() {
            return Err("log_level cannot be empty".to_string());
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), String> {
    let parsed = url::Url::parse(value).map_err(|e| format!("Invalid {} {}: {}", field, value, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("{} must use http or https, got '{}'", field, other)),
    }
}
