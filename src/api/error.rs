//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::chart::ChartError;
use crate::export::ExportError;
use crate::model::ModelError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Cost model rejected the inputs
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Chart could not be rendered
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    /// Export could not be produced
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Model(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.code()),
            ApiError::Chart(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CHART_ERROR"),
            ApiError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::Validation("bad".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ApiError::Model(ModelError::DegenerateFees);
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = ApiError::Chart(ChartError::Format(std::fmt::Error));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::Internal("boom".to_string());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
