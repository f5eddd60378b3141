//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a catch-all dispatch handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener and shut down gracefully
//! - Bridge native requests to the dispatcher through JSON envelopes

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RouterConfig;
use crate::dispatch::{Dispatcher, ResponseEnvelope};
use crate::http::{request, response};
use crate::routing::HttpRouter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub max_body_size: usize,
}

/// HTTP server hosting the dispatcher.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
    dispatcher: Dispatcher,
}

impl HttpServer {
    /// Create a new HTTP server serving `routes`.
    pub fn new(config: RouterConfig, routes: Arc<HttpRouter>) -> Self {
        let dispatcher = Dispatcher::json(routes);

        let state = AppState {
            dispatcher: dispatcher.clone(),
            max_body_size: config.listener.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            dispatcher,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(request::propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(request::set_request_id_layer())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.dispatcher.router().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Catch-all handler: every request goes through the dispatcher.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request::request_id(&request);

    let envelope = match request::to_envelope(request, state.max_body_size).await {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large or unreadable")
                .into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %envelope.method,
        url = %envelope.url,
        "Dispatching request"
    );

    let raw = match serde_json::to_string(&envelope) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                "Failed to encode request envelope"
            );
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match state.dispatcher.handle_request(&raw, None).await {
        Ok(wire) => match serde_json::from_str::<ResponseEnvelope>(&wire) {
            Ok(envelope) => response::from_envelope(envelope),
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "Invalid response envelope");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Request failed");
            response::from_dispatch_error(&e)
        }
    }
}
