//! Read-only access to the climate store.
//!
//! # Data Flow
//! ```text
//! DatabaseConfig
//!     → connect() (read-only SQLite pool)
//!     → handler: pool.begin() (one transaction per request)
//!     → queries.rs (fixed SELECT shapes)
//!     → models.rs / climate::readings (typed rows)
//! ```
//!
//! # Design Decisions
//! - The schema belongs to whoever produced the file; it is never created
//!   or migrated here, and the file is opened read-only
//! - Each request owns its connection for its whole lifetime; dropping the
//!   transaction returns it to the pool on every exit path
//! - Dates are compared as stored `YYYY-MM-DD` text

pub mod models;
pub mod queries;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::climate::WindowError;
use crate::config::DatabaseConfig;

pub use models::{Measurement, Station};

/// Errors that can occur while reading the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection, pool or SQL failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The measurement table has no rows, so there is no latest date.
    #[error("no measurements available")]
    NoData,

    /// The latest stored date does not yield a one-year window.
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Open a read-only connection pool.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    tracing::info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Store pool ready"
    );

    Ok(pool)
}
