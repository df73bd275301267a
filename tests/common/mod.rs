//! Shared utilities for integration tests.

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::{ConnectOptions, Connection};
use tempfile::TempDir;
use tower::ServiceExt;

use climate_api::{store, HttpServer, ServiceConfig};

const SCHEMA: &str = "
    CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp FLOAT,
        tobs FLOAT
    );
";

/// `(id, date, prcp, tobs)`; every row belongs to station `USC00519397`.
pub type Row = (i64, &'static str, Option<f64>, Option<f64>);

/// A seeded SQLite file that lives as long as the fixture.
pub struct Fixture {
    _dir: TempDir,
    pub config: ServiceConfig,
}

impl Fixture {
    /// Create the tables and insert the given rows.
    pub async fn new(measurements: &[Row], stations: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("climate.sqlite");

        let mut conn = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .connect()
            .await
            .unwrap();

        sqlx::raw_sql(SCHEMA).execute(&mut conn).await.unwrap();

        for (i, name) in stations.iter().enumerate() {
            sqlx::query(
                "INSERT INTO station (id, station, name, latitude, longitude, elevation) \
                 VALUES (?1, ?2, ?3, 21.3, -157.8, 10.0)",
            )
            .bind(i as i64 + 1)
            .bind(format!("USC0051{:04}", i))
            .bind(*name)
            .execute(&mut conn)
            .await
            .unwrap();
        }

        for (id, date, prcp, tobs) in measurements {
            sqlx::query(
                "INSERT INTO measurement (id, station, date, prcp, tobs) \
                 VALUES (?1, 'USC00519397', ?2, ?3, ?4)",
            )
            .bind(*id)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(&mut conn)
            .await
            .unwrap();
        }

        conn.close().await.unwrap();

        let mut config = ServiceConfig::default();
        config.listener.bind_address = "127.0.0.1:0".to_string();
        config.database.url = format!("sqlite://{}", path.display());
        config.database.max_connections = 4;

        Self { _dir: dir, config }
    }

    /// A fresh read-only pool over the fixture file.
    pub async fn pool(&self) -> SqlitePool {
        store::connect(&self.config.database).await.unwrap()
    }

    /// Build the server over a fresh read-only pool.
    pub async fn server(&self) -> HttpServer {
        HttpServer::new(self.config.clone(), self.pool().await)
    }

    #[allow(dead_code)]
    pub async fn app(&self) -> Router {
        self.server().await.router()
    }
}

/// A small dataset spanning a little more than one year.
#[allow(dead_code)]
pub fn hawaii_rows() -> Vec<Row> {
    vec![
        (1, "2016-08-01", Some(0.1), Some(68.0)),
        (2, "2016-08-23", Some(0.0), Some(72.0)),
        (3, "2016-08-23", Some(0.15), Some(74.0)),
        (4, "2016-12-01", None, Some(65.0)),
        (5, "2017-03-14", Some(0.4), None),
        (6, "2017-08-22", None, Some(81.0)),
        (7, "2017-08-23", Some(0.02), Some(79.0)),
    ]
}

/// Issue a GET against the router without a socket.
#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    get_with_headers(app, uri, &[]).await
}

#[allow(dead_code)]
pub async fn get_with_headers(
    app: &Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

/// Parse a body as JSON.
#[allow(dead_code)]
pub fn json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}
