//! The fixed query shapes behind each route.
//!
//! Every function takes a borrowed connection so the caller decides the
//! transaction scope. Ties on `date` are broken by `id` so repeated
//! requests return identical bodies.
//!
//! Numeric columns are read through `CAST(.. AS REAL)`: SQLite keeps
//! whole numbers in NUMERIC/DECIMAL columns as INTEGER, which would not
//! decode as `f64`.

use sqlx::SqliteConnection;

use crate::climate::{ObservationWindow, PrecipitationReading, TemperatureStats};
use crate::store::models::{Measurement, Station};
use crate::store::{StoreError, StoreResult};

const STATS_FROM: &str = "SELECT CAST(MIN(tobs) AS REAL), CAST(AVG(tobs) AS REAL), CAST(MAX(tobs) AS REAL) \
     FROM measurement WHERE date >= ?1";

const STATS_BETWEEN: &str = "SELECT CAST(MIN(tobs) AS REAL), CAST(AVG(tobs) AS REAL), CAST(MAX(tobs) AS REAL) \
     FROM measurement WHERE date >= ?1 AND date <= ?2";

const WINDOW_ALL: &str = "SELECT id, station, date, CAST(prcp AS REAL) AS prcp, CAST(tobs AS REAL) AS tobs \
     FROM measurement WHERE date >= ?1 AND date <= ?2 \
     ORDER BY date, id";

const WINDOW_WITH_PRCP: &str = "SELECT id, station, date, CAST(prcp AS REAL) AS prcp, CAST(tobs AS REAL) AS tobs \
     FROM measurement WHERE date >= ?1 AND date <= ?2 AND prcp IS NOT NULL \
     ORDER BY date, id";

const WINDOW_WITH_TOBS: &str = "SELECT id, station, date, CAST(prcp AS REAL) AS prcp, CAST(tobs AS REAL) AS tobs \
     FROM measurement WHERE date >= ?1 AND date <= ?2 AND tobs IS NOT NULL \
     ORDER BY date, id";

/// Which rows of the window to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingFilter {
    All,
    WithPrecipitation,
    WithTemperature,
}

impl ReadingFilter {
    fn sql(self) -> &'static str {
        match self {
            ReadingFilter::All => WINDOW_ALL,
            ReadingFilter::WithPrecipitation => WINDOW_WITH_PRCP,
            ReadingFilter::WithTemperature => WINDOW_WITH_TOBS,
        }
    }
}

/// Date of the measurement with the largest id.
pub async fn latest_date(conn: &mut SqliteConnection) -> StoreResult<String> {
    sqlx::query_scalar::<_, String>("SELECT date FROM measurement ORDER BY id DESC LIMIT 1")
        .fetch_optional(conn)
        .await?
        .ok_or(StoreError::NoData)
}

/// The 365-day window ending at the latest stored date.
pub async fn last_year_window(conn: &mut SqliteConnection) -> StoreResult<ObservationWindow> {
    let last_date = latest_date(conn).await?;
    Ok(ObservationWindow::ending_at(&last_date)?)
}

/// Measurements inside the window, oldest first.
pub async fn measurements_between(
    conn: &mut SqliteConnection,
    window: &ObservationWindow,
    filter: ReadingFilter,
) -> StoreResult<Vec<Measurement>> {
    let rows = sqlx::query_as::<_, Measurement>(filter.sql())
        .bind(&window.start)
        .bind(&window.end)
        .fetch_all(conn)
        .await?;
    Ok(rows)
}

/// Non-null precipitation readings inside the window, oldest first.
pub async fn precipitation(
    conn: &mut SqliteConnection,
    window: &ObservationWindow,
) -> StoreResult<Vec<PrecipitationReading>> {
    let rows = measurements_between(conn, window, ReadingFilter::WithPrecipitation).await?;
    Ok(rows
        .into_iter()
        .filter_map(|m| Some(PrecipitationReading { prcp: m.prcp?, date: m.date }))
        .collect())
}

/// Non-null temperature observations inside the window, oldest first.
pub async fn temperature_observations(
    conn: &mut SqliteConnection,
    window: &ObservationWindow,
) -> StoreResult<Vec<f64>> {
    let rows = measurements_between(conn, window, ReadingFilter::WithTemperature).await?;
    Ok(rows.into_iter().filter_map(|m| m.tobs).collect())
}

/// Every station row in storage order.
pub async fn stations(conn: &mut SqliteConnection) -> StoreResult<Vec<Station>> {
    let rows = sqlx::query_as::<_, Station>(
        "SELECT id, station, name, \
         CAST(latitude AS REAL) AS latitude, \
         CAST(longitude AS REAL) AS longitude, \
         CAST(elevation AS REAL) AS elevation \
         FROM station",
    )
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

/// MIN/AVG/MAX of `tobs` for `date >= start`, bounded by `end` when given.
pub async fn temperature_stats(
    conn: &mut SqliteConnection,
    start: &str,
    end: Option<&str>,
) -> StoreResult<TemperatureStats> {
    let row = match end {
        Some(end) => {
            sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(STATS_BETWEEN)
                .bind(start)
                .bind(end)
                .fetch_one(conn)
                .await?
        }
        None => {
            sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(STATS_FROM)
                .bind(start)
                .fetch_one(conn)
                .await?
        }
    };
    Ok(TemperatureStats::from(row))
}

/// Cheap round trip used by the health route.
pub async fn ping(conn: &mut SqliteConnection) -> StoreResult<()> {
    sqlx::query("SELECT 1").execute(conn).await?;
    Ok(())
}
