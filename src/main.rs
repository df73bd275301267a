//! Climate API
//!
//! A read-only HTTP query service built with Tokio, Axum and SQLx.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌──────────┐
//!                     │  http    │──▶│ handlers │──▶│  store    │──▶│  SQLite  │
//!                     │  server  │   │          │   │  queries  │   │  (r/o)   │
//!     ◀────────────── └──────────┘   └────┬─────┘   └───────────┘   └──────────┘
//!     JSON / HTML                         │
//!                                         ▼
//!                                   ┌──────────┐
//!                                   │ climate  │  window, date params, JSON shapes
//!                                   └──────────┘
//!
//!     Cross-cutting: config · observability · lifecycle
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use climate_api::config::{load_config, ConfigOverrides};
use climate_api::observability::{logging, metrics};
use climate_api::{store, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "climate-api")]
#[command(about = "Read-only HTTP API over a climate observation dataset", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `database.url`.
    #[arg(short, long)]
    database_url: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_address: self.bind.clone(),
            database_url: self.database_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref(), &args.overrides())?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!("climate-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database_url = %config.database.url,
        request_timeout_secs = config.timeouts.request_secs,
        strict_dates = config.api.strict_dates,
        "Configuration loaded"
    );

    let pool = store::connect(&config.database).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, pool);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
