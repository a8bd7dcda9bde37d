//! npm CDN gateway
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌───────────────────────────────────────────────┐
//!                          │                   GATEWAY                      │
//!   Client Request         │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!   ───────────────────────┼─▶│  http   │──▶│ routing  │──▶│  handlers  │  │
//!                          │  │ server  │   │classifier│   └─────┬──────┘  │
//!                          │  └─────────┘   └──────────┘         │         │
//!                          │                      ┌──────────────┴───┐     │
//!                          │                      ▼                  ▼     │
//!                          │               ┌────────────┐     ┌──────────┐ │     ┌──────────┐
//!                          │               │  registry  │     │   cdn    │─┼────▶│ origin 1 │
//!                          │               │ manifest + │     │ fallback │ │     │ origin 2 │
//!                          │               │   entry    │     │   walk   │ │     │   ...    │
//!                          │               └─────┬──────┘     └──────────┘ │     └──────────┘
//!                          │                     │                         │
//!                          └─────────────────────┼─────────────────────────┘
//!                                                ▼
//!                                         npm registry
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use npm_cdn_gateway::config::{finalize_config, load_config, GatewayConfig};
use npm_cdn_gateway::lifecycle::{wait_for_shutdown_signal, Shutdown};
use npm_cdn_gateway::net::listener;
use npm_cdn_gateway::observability::{logging, metrics};
use npm_cdn_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "npm-cdn-gateway", version)]
#[command(about = "Serve npm package files from public CDNs", long_about = None)]
struct Args {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    let config = finalize_config(config).context("validating configuration")?;

    logging::init(&config.observability.log_level);
    tracing::info!("npm-cdn-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        registry = %config.registry.url,
        origins = ?config.cdn.origins,
        max_connections = config.listener.max_connections,
        "Configuration loaded"
    );

    let listener = listener::bind(&config.listener)
        .await
        .context("binding listener")?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config).context("building upstream HTTP clients")?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
