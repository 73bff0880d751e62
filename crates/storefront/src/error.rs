//! Unified error handling for the page host, with Sentry integration.
//!
//! Cart service failures never reach this type: the controller turns them
//! into error dialogs on the page. What remains are malformed browser
//! requests and page rendering failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the page host.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Page template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Render(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Don't expose template internals to clients
        let message = match &self {
            Self::Render(_) => "Internal server error".to_string(),
            Self::BadRequest(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for a page event.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user
/// actions leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}
