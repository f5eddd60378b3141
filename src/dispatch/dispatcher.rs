//! Per-request dispatch.
//!
//! # Responsibilities
//! - Decode the host request envelope
//! - Resolve the handler through the routing table
//! - Invoke it, or answer 404 when nothing matches
//! - Encode the response and fold every failure into `DispatchError`

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tracing::Instrument;

use crate::dispatch::codec::{HostCodec, JsonCodec};
use crate::dispatch::error::{DispatchError, ErrorPayload};
use crate::dispatch::types::Response;
use crate::observability::metrics;
use crate::routing::HttpRouter;

const HOST_UNAVAILABLE: &str = "no host codec is configured: requests can only be dispatched \
    by a Dispatcher built with `with_host` (or `Dispatcher::json`), which supplies the \
    request decoder and response encoder";

/// Maps wire requests to handlers registered in an [`HttpRouter`].
///
/// Cheap to clone; the routing table is shared and never mutated.
#[derive(Clone)]
pub struct Dispatcher {
    router: Arc<HttpRouter>,
    host: Option<Arc<dyn HostCodec>>,
}

impl Dispatcher {
    /// Create a dispatcher with no host codec attached.
    pub fn new(router: Arc<HttpRouter>) -> Self {
        Self { router, host: None }
    }

    /// Create a dispatcher speaking the JSON envelopes.
    pub fn json(router: Arc<HttpRouter>) -> Self {
        Self::new(router).with_host(Arc::new(JsonCodec))
    }

    pub fn with_host(mut self, host: Arc<dyn HostCodec>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn router(&self) -> &HttpRouter {
        &self.router
    }

    /// Dispatch one encoded request and return the encoded response.
    ///
    /// A non-empty `route_hint` replaces the URL pathname for lookup.
    pub async fn handle_request(
        &self,
        raw: &str,
        route_hint: Option<&str>,
    ) -> Result<String, DispatchError> {
        let span = tracing::debug_span!(
            "dispatch",
            method = tracing::field::Empty,
            path = tracing::field::Empty
        );
        let result = self.dispatch(raw, route_hint).instrument(span).await;

        if let Err(e) = &result {
            tracing::error!(stage = e.stage(), error = %e, "Dispatch failed");
            metrics::record_dispatch_error(e.stage());
        }
        result
    }

    async fn dispatch(&self, raw: &str, route_hint: Option<&str>) -> Result<String, DispatchError> {
        let start = Instant::now();
        let host = self
            .host
            .as_ref()
            .ok_or_else(|| DispatchError::HostUnavailable(HOST_UNAVAILABLE.to_string()))?;

        let request = guarded(host.decode_request(raw))
            .await
            .map_err(DispatchError::Decode)?;

        let path = match route_hint.filter(|hint| !hint.is_empty()) {
            Some(hint) => hint.to_string(),
            None => request.pathname().to_string(),
        };
        let method = request.method.clone();

        let span = tracing::Span::current();
        span.record("method", method.as_str());
        span.record("path", path.as_str());

        let (response, route) = match self.router.lookup(&path, &method) {
            Some(matched) => {
                tracing::debug!(route = %matched.route, "Route matched");
                let invocation = async {
                    matched.handler.call(request).await.map_err(|e| e.0)
                };
                let response = guarded(invocation)
                    .await
                    .map_err(|payload| DispatchError::Handler {
                        route: matched.route.clone(),
                        payload,
                    })?;
                (response, matched.route)
            }
            None => {
                tracing::warn!("No route matched");
                (Response::not_found(&path), "none".to_string())
            }
        };

        let status = response.status;
        let wire = guarded(host.encode_response(response))
            .await
            .map_err(DispatchError::Encode)?;

        tracing::debug!(route = %route, status, "Request dispatched");
        metrics::record_request(&method, status, &route, start);
        Ok(wire)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.router.len())
            .field("host", &self.host.is_some())
            .finish()
    }
}

/// Run `fut`, turning a panic into an error payload.
async fn guarded<T, F>(fut: F) -> Result<T, ErrorPayload>
where
    F: Future<Output = Result<T, ErrorPayload>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => Err(ErrorPayload::Message(panic_message(panic))),
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guarded_catches_panic() {
        let result: Result<(), _> = guarded(async { panic!("boom") }).await;
        assert_eq!(result, Err(ErrorPayload::message("panicked: boom")));
    }

    #[tokio::test]
    async fn test_guarded_passes_errors_through() {
        let result: Result<(), _> = guarded(async { Err(ErrorPayload::message("nope")) }).await;
        assert_eq!(result, Err(ErrorPayload::message("nope")));
    }
}
