//! HTTP action router (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────────┐
//!                     │                      ACTION ROUTER                        │
//!                     │                                                           │
//!   Client Request    │  ┌─────────┐    ┌──────────┐    ┌────────────┐            │
//!   ──────────────────┼─▶│  http   │───▶│ dispatch │───▶│  routing   │            │
//!                     │  │ server  │    │ (decode) │    │  lookup    │            │
//!                     │  └─────────┘    └──────────┘    └─────┬──────┘            │
//!                     │                                       │                   │
//!                     │                                       ▼                   │
//!   Client Response   │  ┌─────────┐    ┌──────────┐    ┌────────────┐            │
//!   ◀─────────────────┼──│  http   │◀───│ dispatch │◀───│  handler   │            │
//!                     │  │response │    │ (encode) │    │ or 404     │            │
//!                     │  └─────────┘    └──────────┘    └────────────┘            │
//!                     │                                                           │
//!                     │  Cross-cutting: config, observability, admin, lifecycle   │
//!                     └──────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use action_router::config::{load_config, RouterConfig};
use action_router::lifecycle;
use action_router::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "action-router")]
#[command(about = "HTTP action router", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    init_logging(&config.observability);
    tracing::info!("action-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        admin_enabled = config.admin.enabled,
        "Configuration loaded"
    );

    lifecycle::run(config).await?;
    Ok(())
}
