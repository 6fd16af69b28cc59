//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use zabdash_domain::error::DashError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`DashError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(DashError);

impl From<DashError> for ApiError {
    fn from(err: DashError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DashError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            DashError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            DashError::Upstream(err) => {
                tracing::error!(error = %err, "monitoring server error");
                (
                    StatusCode::BAD_GATEWAY,
                    "monitoring server unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
