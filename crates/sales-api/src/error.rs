//! # API Error Types
//!
//! Unified error handling for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sales_analytics::AnalyticsError;
use thiserror::Error;

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Analytics(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Analytics(AnalyticsError::DataUnavailable { .. }) => "DATA_UNAVAILABLE",
            Self::Analytics(AnalyticsError::Schema { .. }) => "SCHEMA_ERROR",
            Self::Analytics(AnalyticsError::Conversion(_)) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "Request failed");
        }

        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": self.error_code(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
