//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use playhook_domain::error::{PlayhookError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`PlayhookError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(PlayhookError);

impl From<PlayhookError> for ApiError {
    fn from(err: PlayhookError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// A path segment that should have been an identifier.
    pub(crate) fn invalid_id(raw: &str) -> Self {
        Self(ValidationError::InvalidId(raw.to_string()).into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PlayhookError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            PlayhookError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            PlayhookError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            PlayhookError::Host(err) => {
                tracing::error!(error = %err, "host error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Parse an identifier taken from the request path.
pub(crate) fn parse_id<T: std::str::FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| ApiError::invalid_id(raw))
}
