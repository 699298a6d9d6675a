//! PathFinder API: error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pathfinder_core::error::DomainError;
use pathfinder_tours::domain::catalog::CatalogError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The tour catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Tracing or span export could not be set up.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// `DomainError` carried to the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    /// Status and machine-readable code for the wrapped error.
    #[must_use]
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            DomainError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Playback(_) => (StatusCode::CONFLICT, "playback_error"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.classify();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = ErrorBody {
            error,
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_domain_errors_classify_to_status_and_code() {
        let cases = [
            (
                DomainError::SessionNotFound(Uuid::new_v4()),
                StatusCode::NOT_FOUND,
                "session_not_found",
            ),
            (
                DomainError::Validation("query must not be empty".into()),
                StatusCode::BAD_REQUEST,
                "validation_error",
            ),
            (
                DomainError::Playback("audio is not playable".into()),
                StatusCode::CONFLICT,
                "playback_error",
            ),
            (
                DomainError::Infrastructure("session lock poisoned".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "infrastructure_error",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(ApiError(err).classify(), (status, code));
        }
    }

    #[test]
    fn test_response_uses_classified_status() {
        let response = ApiError(DomainError::Validation("bad index".into())).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
