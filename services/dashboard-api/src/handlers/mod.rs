//! HTTP handlers for the dashboard API.

pub mod daily;
pub mod dashboard;
pub mod health;
pub mod stations;
pub mod summary;

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;

use precip_common::PrecipError;

/// Handler result type; errors render as JSON with the mapped status.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON error body returned to the dashboard.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// Wrapper turning [`PrecipError`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub PrecipError);

impl From<PrecipError> for ApiError {
    fn from(err: PrecipError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.http_status_code();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            code,
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
