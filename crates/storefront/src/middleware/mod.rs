//! HTTP middleware stack for the page host.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, request transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (unique ID per request)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
