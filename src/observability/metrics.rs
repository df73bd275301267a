//! Metrics collection and exposition.
//!
//! # Metrics
//! - `climate_requests_total` (counter): requests by method, route, status
//! - `climate_request_duration_seconds` (histogram): latency by method, route
//!
//! Recording is always on; without an installed exporter the `metrics`
//! macros are no-ops.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(method: &str, route: &str, status: u16, start_time: Instant) {
    metrics::counter!(
        "climate_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "climate_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start_time.elapsed().as_secs_f64());
}

/// Route-level middleware. Labels by the matched route template so path
/// parameters do not explode label cardinality.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start_time);
    response
}
