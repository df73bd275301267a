//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, metrics)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown, then close the pool

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ApiConfig, ServiceConfig};
use crate::http::handlers;
use crate::http::request::make_request_span;
use crate::lifecycle::shutdown::wait_for_trigger;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub api: ApiConfig,
}

/// HTTP server for the climate API.
pub struct HttpServer {
    router: Router,
    pool: SqlitePool,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server over an already opened pool.
    pub fn new(config: ServiceConfig, pool: SqlitePool) -> Self {
        let state = AppState {
            pool: pool.clone(),
            api: config.api.clone(),
        };
        let router = build_router(&config, state);
        Self {
            router,
            pool,
            config,
        }
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            strict_dates = self.config.api.strict_dates,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_trigger(shutdown))
            .await?;

        self.pool.close().await;
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
///
/// Static `/api/v1.0/*` routes take precedence over the `{start_date}`
/// capture.
#[allow(deprecated)]
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health))
        .route("/api/v1.0/precipitation", get(handlers::precipitation))
        .route("/api/v1.0/stations", get(handlers::stations))
        .route("/api/v1.0/tobs", get(handlers::tobs))
        .route("/api/v1.0/{start_date}", get(handlers::stats_from))
        .route("/api/v1.0/{start_date}/{end_date}", get(handlers::stats_between))
        .route_layer(middleware::from_fn(metrics::track_metrics))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
