//! Row types for the two tables the service reads.

use serde::Serialize;
use sqlx::FromRow;

/// One weather-station reading.
///
/// `id` increases with `date`, so the row with the largest id holds the
/// most recent date.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Measurement {
    pub id: i64,
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: Option<f64>,
}

/// Metadata for an observation site.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}
