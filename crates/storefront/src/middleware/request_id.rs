//! Request ID middleware for request tracing and correlation.
//!
//! An upstream proxy's `x-request-id` is reused when it looks like an ID;
//! anything else is replaced by a fresh UUID v4. The chosen ID is recorded
//! on the tracing span, tagged on the Sentry scope and echoed back.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID that is passed through unchanged.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Middleware that ensures every request carries a usable request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = upstream_id(request.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// The upstream ID, if present and made of visible ASCII within the length cap.
fn upstream_id(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    let usable = !value.is_empty()
        && value.len() <= MAX_UPSTREAM_ID_LEN
        && value.bytes().all(|b| b.is_ascii_graphic());
    usable.then(|| value.to_string())
}
