//! Climate API Library
//!
//! Read-only HTTP query service over a SQLite climate dataset of
//! per-station precipitation and temperature readings.

pub mod climate;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
