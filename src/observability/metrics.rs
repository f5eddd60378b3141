//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): dispatched requests by method, route, status
//! - `router_request_duration_seconds` (histogram): dispatch latency by method, route
//! - `router_dispatch_errors_total` (counter): failed dispatches by stage
//!
//! # Design Decisions
//! - Labels use the display route (`/files/*`), never the raw path, to bound cardinality
//! - Method labels are the routable methods plus `HEAD`; anything else is `OTHER`
//! - Recording is a no-op until `init_metrics` installs the Prometheus exporter

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Method;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Map a client-supplied method onto a fixed label set.
pub fn method_label(method: &str) -> &'static str {
    if method == "HEAD" {
        return "HEAD";
    }
    method
        .parse::<Method>()
        .map(|m| m.as_str())
        .unwrap_or("OTHER")
}

/// Record a completed dispatch.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let method = method_label(method);

    counter!(
        "router_requests_total",
        "method" => method,
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "router_request_duration_seconds",
        "method" => method,
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a dispatch that ended in a `DispatchError`.
pub fn record_dispatch_error(stage: &'static str) {
    counter!("router_dispatch_errors_total", "stage" => stage).increment(1);
}
