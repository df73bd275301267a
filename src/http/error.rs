//! Mapping of query failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::climate::InvalidDate;
use crate::store::StoreError;

/// Errors a query handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Store(StoreError::Database(e))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NoData) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Query failed");
            "internal server error".to_string()
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::WindowError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(StoreError::NoData).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(InvalidDate { param: "start_date", value: "x".into() }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(StoreError::from(WindowError::MalformedDate("bad".into()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_server_error_body_is_generic() {
        let response = ApiError::from(sqlx::Error::PoolTimedOut).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"internal server error"}"#);
    }
}
