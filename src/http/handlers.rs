//! Route handlers.
//!
//! Each handler opens its own transaction on a pooled connection, runs one
//! query shape and reshapes the rows. Dropping the transaction on an error
//! path rolls it back and returns the connection to the pool.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::climate::{date_param, PrecipitationReading, TemperatureStats};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::store::queries;

pub const WELCOME_PAGE: &str = "Welcome to the Climate API!<br/><br/>\
Available routes:<br/><br/>\
Precipitation over the last year of data: /api/v1.0/precipitation<br/>\
Weather station names: /api/v1.0/stations<br/>\
Temperature observations over the last year of data: /api/v1.0/tobs<br/>\
Min, average and max temperature from a date, or between two dates: \
/api/v1.0/&lt;start&gt; and /api/v1.0/&lt;start&gt;/&lt;end&gt;<br/>";

pub async fn welcome() -> Html<&'static str> {
    tracing::info!("Received request for welcome page");
    Html(WELCOME_PAGE)
}

/// Liveness of the store connection.
pub async fn health(State(state): State<AppState>) -> Response {
    let result = match state.pool.acquire().await {
        Ok(mut conn) => queries::ping(&mut conn).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => Json(json!({ "status": "ok" })).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "unavailable" }))).into_response()
        }
    }
}

pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<Vec<PrecipitationReading>>, ApiError> {
    tracing::info!("Received request for precipitation");

    let mut tx = state.pool.begin().await?;
    let window = queries::last_year_window(&mut tx).await?;
    let readings = queries::precipitation(&mut tx, &window).await?;
    tx.commit().await?;

    tracing::debug!(start = %window.start, end = %window.end, rows = readings.len(), "Precipitation window");
    Ok(Json(readings))
}

pub async fn stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    tracing::info!("Received request for stations");

    let mut tx = state.pool.begin().await?;
    let stations = queries::stations(&mut tx).await?;
    tx.commit().await?;

    Ok(Json(stations.into_iter().map(|s| s.name).collect()))
}

pub async fn tobs(State(state): State<AppState>) -> Result<Json<Vec<f64>>, ApiError> {
    tracing::info!("Received request for temperature observations");

    let mut tx = state.pool.begin().await?;
    let window = queries::last_year_window(&mut tx).await?;
    let temps = queries::temperature_observations(&mut tx, &window).await?;
    tx.commit().await?;

    tracing::debug!(start = %window.start, end = %window.end, rows = temps.len(), "Temperature window");
    Ok(Json(temps))
}

pub async fn stats_from(
    State(state): State<AppState>,
    Path(start_date): Path<String>,
) -> Result<Json<TemperatureStats>, ApiError> {
    tracing::info!(start_date = %start_date, "Received request for temperature stats");

    let start = date_param("start_date", start_date, state.api.strict_dates)?;

    let mut tx = state.pool.begin().await?;
    let stats = queries::temperature_stats(&mut tx, &start, None).await?;
    tx.commit().await?;

    Ok(Json(stats))
}

pub async fn stats_between(
    State(state): State<AppState>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, ApiError> {
    tracing::info!(
        start_date = %start_date,
        end_date = %end_date,
        "Received request for temperature stats"
    );

    let start = date_param("start_date", start_date, state.api.strict_dates)?;
    let end = date_param("end_date", end_date, state.api.strict_dates)?;

    let mut tx = state.pool.begin().await?;
    let stats = queries::temperature_stats(&mut tx, &start, Some(&end)).await?;
    tx.commit().await?;

    Ok(Json(stats))
}
