use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use robomart_workflow::errors::WorkflowError;
use thiserror::Error;

use crate::dto::response::ErrorResponse;

// =============================================================================
// ApiError
// =============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{entity_type} with identifier '{identifier}' not found")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Internal server error")]
    Internal { message: String },
}

// =============================================================================
// Factory Methods
// =============================================================================

impl ApiError {
    #[must_use]
    pub fn not_found(entity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.into(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// =============================================================================
// Query Methods
// =============================================================================

impl ApiError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Conflict { .. } => "CONFLICT",
            Self::Timeout => "TIMEOUT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl From<WorkflowError> for ApiError {
    fn from(error: WorkflowError) -> Self {
        match error {
            WorkflowError::InvalidArgument { message } => Self::Validation { message },
            WorkflowError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                entity_type,
                identifier,
            },
            WorkflowError::Conflict { reason } => Self::Conflict { reason },
            WorkflowError::Timeout { .. } => Self::Timeout,
            WorkflowError::Storage { operation, message } => {
                tracing::error!(%operation, %message, "storage failure surfaced to client");
                Self::Internal { message }
            }
        }
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error_code = self.error_code();

        // Internal details stay in the logs, not in the response body.
        let message = match &self {
            Self::Internal { .. } => "internal server error".to_string(),
            other => other.to_string(),
        };

        (status_code, Json(ErrorResponse::new(error_code, message))).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::not_found("Order", "1"), StatusCode::NOT_FOUND)]
    #[case(ApiError::validation("bad"), StatusCode::BAD_REQUEST)]
    #[case(ApiError::unauthorized("no session"), StatusCode::UNAUTHORIZED)]
    #[case(ApiError::forbidden("bad key"), StatusCode::FORBIDDEN)]
    #[case(ApiError::Timeout, StatusCode::REQUEST_TIMEOUT)]
    #[case(ApiError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_codes_match_variants(#[case] error: ApiError, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[rstest]
    fn workflow_timeout_maps_to_request_timeout() {
        let error: ApiError = WorkflowError::timeout("generate_delivery_plan").into();
        assert_eq!(error.status_code(), StatusCode::REQUEST_TIMEOUT);
    }

    #[rstest]
    fn workflow_invalid_argument_maps_to_bad_request() {
        let error: ApiError = WorkflowError::invalid_argument("negative capacity").into();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    fn workflow_storage_maps_to_internal() {
        let error: ApiError = WorkflowError::storage("commit", "io error").into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[rstest]
    fn workflow_conflict_maps_to_conflict() {
        let error: ApiError = WorkflowError::conflict("retries exhausted").into();
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
    }
}
