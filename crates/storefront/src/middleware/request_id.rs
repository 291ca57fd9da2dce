//! Request ID middleware for request tracing and correlation.
//!
//! Every request carries an ID: the upstream `x-request-id` if it is usable,
//! otherwise a fresh UUID v4. The ID is recorded on the `http_request` span,
//! tagged on the Sentry scope, stored in the request extensions as
//! [`RequestId`], and echoed back in the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upstream IDs longer than this are replaced.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Request ID available to handlers via `Extension<RequestId>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Accept an upstream ID only if it is short, visible ASCII.
    fn from_upstream(value: &HeaderValue) -> Option<Self> {
        let value = value.to_str().ok()?.trim();
        let usable = !value.is_empty()
            && value.len() <= MAX_UPSTREAM_ID_LEN
            && value.bytes().all(|b| b.is_ascii_graphic());
        usable.then(|| Self(value.to_string()))
    }

    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(RequestId::from_upstream)
        .unwrap_or_else(RequestId::generate);

    Span::current().record("request_id", request_id.0.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.0) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
