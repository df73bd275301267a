//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware layers)
//!     → request.rs (request ID, trace span)
//!     → handlers.rs (one pooled transaction per request, fixed query)
//!     → error.rs (failures mapped to status + JSON body)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use server::{build_router, AppState, HttpServer};
