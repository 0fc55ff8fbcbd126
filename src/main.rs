// PubSub Relay - CloudEvent Function Host Entry Point

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use pubsub_relay::storage::config::ConfigService;
use pubsub_relay::utils::logging::init_tracing;
use pubsub_relay::{server, AppState, RelayConfigUpdate};

/// Serve a Pub/Sub CloudEvent function over HTTP.
#[derive(Debug, Parser)]
#[command(name = "pubsub-relay", version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Function to serve (sendDiscord or HelloPubSub)
    #[arg(long, env = "FUNCTION_TARGET")]
    target: Option<String>,

    /// Listen address
    #[arg(long, env = "BIND_ADDRESS")]
    bind_address: Option<String>,

    /// Listen port
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Discord webhook URL
    #[arg(long, env = "DISCORD_WEBHOOK_URL", hide_env_values = true)]
    webhook_url: Option<String>,

    /// Proxy for the outbound webhook request
    #[arg(long, env = "RELAY_PROXY_URL")]
    proxy_url: Option<String>,

    /// Outbound request timeout in seconds
    #[arg(long, env = "RELAY_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, env = "RELAY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Write the effective configuration to this file and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

impl Cli {
    fn to_update(&self) -> RelayConfigUpdate {
        RelayConfigUpdate {
            function_target: self.target.clone(),
            bind_address: self.bind_address.clone(),
            port: self.port,
            webhook_url: self.webhook_url.clone(),
            proxy_url: self.proxy_url.clone(),
            timeout_secs: self.timeout_secs,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut service = ConfigService::load(cli.config.as_deref())?;
    service.apply_update(cli.to_update());
    let config_path = service.config_path().map(|path| path.display().to_string());
    let config = service.finalize()?;

    if let Some(path) = &cli.write_config {
        ConfigService::save_to_file(path, &config)?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    init_tracing(&config.log_level)?;
    info!(
        config = config_path.as_deref().unwrap_or("<defaults>"),
        function = %config.function_target,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config)?;
    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.bind_address, config.port))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting pubsub-relay");
    server::serve(listener, state).await?;
    Ok(())
}
