//! HTTP Client Factory
//!
//! Builds the `reqwest::Client` used by webhook channels from the outbound
//! settings.

use std::time::Duration;

use crate::models::settings::OutboundConfig;

use super::types::WebhookError;

/// Build a `reqwest::Client` for webhook delivery.
///
/// - `proxy_url: Some(..)` -> route every request through that proxy
/// - `proxy_url: None` -> explicitly disable proxy (`no_proxy`), ignoring env vars
/// - `timeout_secs: None` -> no client-level timeout
pub fn build_http_client(config: &OutboundConfig) -> Result<reqwest::Client, WebhookError> {
    let mut builder = reqwest::Client::builder();
    match config.proxy_url.as_deref() {
        Some(url) => {
            let proxy = reqwest::Proxy::all(url)
                .map_err(|e| WebhookError::InvalidConfig(format!("proxy {}: {}", url, e)))?;
            builder = builder.proxy(proxy);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
