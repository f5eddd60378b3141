//! Startup orchestration.
//!
//! # Responsibilities
//! - Register every configured route
//! - Start the metrics exporter when enabled
//! - Bind listeners and serve until a shutdown signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when routes are registered)
//! - A server that exits early shuts the whole process down

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use crate::admin::{setup_admin_router, AdminState};
use crate::config::{build_router, RouterConfig, ValidationError};
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::wait_for_shutdown_signal;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid route table: {0:?}")]
    Routes(Vec<ValidationError>),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start every server described by `config` and run until shutdown.
pub async fn run(config: RouterConfig) -> Result<(), StartupError> {
    let routes = Arc::new(build_router(&config.routes).map_err(StartupError::Routes)?);
    tracing::info!(routes = routes.len(), "Route table registered");

    if config.observability.metrics_enabled {
        let raw = &config.observability.metrics_address;
        let addr: SocketAddr = raw
            .parse()
            .map_err(|_| StartupError::MetricsAddress(raw.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let shutdown = Shutdown::new();
    let mut tasks = JoinSet::new();

    if config.admin.enabled {
        let listener = TcpListener::bind(&config.admin.bind_address).await?;
        tracing::info!(address = %listener.local_addr()?, "Admin API listening");

        let state = AdminState::new(routes.clone(), config.admin.api_key.as_str());
        let app = setup_admin_router(state);
        let mut stop = shutdown.subscribe();
        tasks.spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stop.recv().await;
                })
                .await
        });
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, routes);
    tasks.spawn(server.run(listener, shutdown.subscribe()));

    supervise(tasks, wait_for_shutdown_signal(), &shutdown).await;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for `signal` or for any server to exit, then stop and drain the rest.
async fn supervise<S>(
    mut tasks: JoinSet<Result<(), std::io::Error>>,
    signal: S,
    shutdown: &Shutdown,
) where
    S: Future<Output = ()>,
{
    tokio::select! {
        _ = signal => {}
        Some(result) = tasks.join_next() => {
            log_exit(result);
            tracing::warn!("Server exited before shutdown was requested");
        }
    }
    shutdown.trigger();

    while let Some(result) = tasks.join_next().await {
        log_exit(result);
    }
}

fn log_exit(result: Result<Result<(), std::io::Error>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(error = %e, "Server exited with error"),
        Err(e) => tracing::error!(error = %e, "Server task panicked"),
    }
}
