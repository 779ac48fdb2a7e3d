//! API error types with automatic HTTP status code mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use trowel_calculator::CalcError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource not found (404 Not Found)
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Input validation failures (422 Unprocessable Entity)
    #[error("Validation failed")]
    Validation { errors: Vec<String> },

    /// Calculation faults (422 Unprocessable Entity). The original error
    /// text is preserved for the client; retrying the same request will
    /// fail the same way.
    #[error("Calculation error: {message}")]
    Calculation { message: String },

    /// Internal server errors (500 Internal Server Error)
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Calculation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::Calculation { .. } => "CALCULATION_ERROR",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            errors: match self {
                ApiError::Validation { errors } => Some(errors.clone()),
                _ => None,
            },
        }
    }
}

/// JSON-serializable error response
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    /// Individual validation failures, present only for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl From<CalcError> for ApiError {
    fn from(err: CalcError) -> Self {
        match err {
            CalcError::UnknownCalculator { type_id } => {
                ApiError::NotFound { resource: format!("Calculator '{type_id}'") }
            }
            CalcError::Validation { errors } => ApiError::Validation { errors },
            CalcError::Computation { message } => ApiError::Calculation { message },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.to_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_calculator_maps_to_404() {
        let err: ApiError =
            CalcError::UnknownCalculator { type_id: "quantum".to_string() }.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn validation_payload_carries_individual_errors() {
        let err: ApiError =
            CalcError::Validation { errors: vec!["Area must be positive".to_string()] }.into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let response = err.to_response();
        assert_eq!(response.code, "VALIDATION_ERROR");
        assert_eq!(response.errors.as_deref(), Some(&["Area must be positive".to_string()][..]));
    }

    #[test]
    fn computation_fault_preserves_message() {
        let err: ApiError = CalcError::computation("margin must be under 100%").into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.to_string().contains("margin must be under 100%"));
    }
}
