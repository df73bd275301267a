//! Request identification.
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A client-supplied `x-request-id` is kept, otherwise a UUID v4 is set
//! - The same ID is echoed on the response

use axum::{body::Body, http::Request};
use tracing::Span;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Read the request ID set by the request-id layer.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Span for tower-http's `TraceLayer`, carrying the request ID.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_lookup() {
        let request = Request::builder()
            .header(X_REQUEST_ID, "abc-123")
            .body(())
            .unwrap();
        assert_eq!(request_id(&request), "abc-123");

        let bare = Request::builder().body(()).unwrap();
        assert_eq!(request_id(&bare), "unknown");
    }
}
