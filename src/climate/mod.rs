//! Climate domain types.
//!
//! # Data Flow
//! ```text
//! latest stored date
//!     → window.rs (one-year observation window)
//!     → store queries
//!     → readings.rs (JSON shapes returned to clients)
//!
//! path parameters
//!     → dates.rs (canonical YYYY-MM-DD check, or passthrough)
//! ```

pub mod dates;
pub mod readings;
pub mod window;

pub use dates::{date_param, InvalidDate, DATE_FORMAT};
pub use readings::{PrecipitationReading, TemperatureStats};
pub use window::{ObservationWindow, WindowError};
