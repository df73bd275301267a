//! The "last year of record" window.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::climate::dates::{parse_canonical, DATE_FORMAT};

/// Length of the window ending at the latest stored date.
pub const WINDOW_DAYS: u64 = 365;

/// Inclusive date range `[start, end]` as stored `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationWindow {
    pub start: String,
    pub end: String,
}

/// Why no window could be built from the latest stored date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("malformed stored date '{0}'")]
    MalformedDate(String),

    #[error("no 365-day window ends at '{0}': start precedes the earliest representable date")]
    OutOfRange(String),
}

impl ObservationWindow {
    /// Build the window that ends at `last_date` and starts 365 days earlier.
    pub fn ending_at(last_date: &str) -> Result<Self, WindowError> {
        let end = parse_canonical(last_date)
            .ok_or_else(|| WindowError::MalformedDate(last_date.to_string()))?;
        Self::ending_on(end)
    }

    pub fn ending_on(end: NaiveDate) -> Result<Self, WindowError> {
        let end_text = end.format(DATE_FORMAT).to_string();
        match end.checked_sub_days(Days::new(WINDOW_DAYS)) {
            Some(start) => Ok(Self {
                start: start.format(DATE_FORMAT).to_string(),
                end: end_text,
            }),
            None => Err(WindowError::OutOfRange(end_text)),
        }
    }

    pub fn contains(&self, date: &str) -> bool {
        self.start.as_str() <= date && date <= self.end.as_str()
    }
}
