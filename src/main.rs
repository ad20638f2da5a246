//! urlcounts (v1)
//!
//! Matches batches of URLs against a known host list and reports
//! per-host match counts. Built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌───────────────────────────────────────────────────┐
//!                         │                     URLCOUNTS                      │
//!                         │                                                    │
//!   POST /urlcounts       │  ┌──────────┐    ┌──────────┐    ┌─────────────┐  │
//!   ──────────────────────┼─▶│   http   │───▶│ request  │───▶│  matching   │  │
//!                         │  │  server  │    │  decode  │    │ UrlCounter  │  │
//!                         │  └──────────┘    └──────────┘    └──────┬──────┘  │
//!                         │                                         │         │
//!                         │                        hosts.txt ──────▶│         │
//!                         │                                         ▼         │
//!   MatchResult JSON      │  ┌──────────┐                    ┌─────────────┐  │
//!   ◀─────────────────────┼──│ response │◀───────────────────│  aggregate  │  │
//!                         │  └──────────┘                    └─────────────┘  │
//!                         │                                                    │
//!                         │  Cross-cutting: config, observability, lifecycle   │
//!                         └───────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use urlcounts::config::resolve_config;
use urlcounts::lifecycle::{signals, Shutdown};
use urlcounts::observability::{logging, metrics};
use urlcounts::HttpServer;

#[derive(Parser)]
#[command(name = "urlcounts", version)]
#[command(about = "Count how many submitted URLs match a known host list", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(args.config.as_deref())?;

    logging::init_logging(&config.observability)?;

    tracing::info!("urlcounts v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        hosts_path = %config.hosts.path,
        hosts_cache = config.hosts.cache,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(&shutdown);

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
