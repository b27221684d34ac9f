//! Error handling for the back-office dashboard
//!
//! Every error ends up as a toast on the client, so each response carries a
//! single display message plus a machine-readable code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::FieldError;
use thiserror::Error;

/// Shown when the remote API gives no usable message
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Missing staff token")]
    MissingToken,

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business rule errors checked before calling the remote API
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Insufficient inventory: {0}")]
    InsufficientInventory(String),

    // Remote API errors
    #[error("Upstream error {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Unexpected upstream response: {0}")]
    UpstreamDecode(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<FieldError> for AppError {
    fn from(err: FieldError) -> Self {
        AppError::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        shared::first_message(&errors).into()
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Internal(format!("CSV export failed: {}", err))
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidStateTransition(_) | AppError::InsufficientInventory(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Upstream { status, .. } => *status,
            AppError::UpstreamUnavailable(_) | AppError::UpstreamDecode(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Internal(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn detail(&self) -> ErrorDetail {
        let (code, message, field) = match self {
            AppError::MissingToken => (
                "MISSING_TOKEN",
                "Please sign in again".to_string(),
                None,
            ),
            AppError::Validation { field, message } => {
                ("VALIDATION_ERROR", message.clone(), Some(field.clone()))
            }
            AppError::NotFound(resource) => ("NOT_FOUND", format!("{} not found", resource), None),
            AppError::InvalidStateTransition(msg) => {
                ("INVALID_STATE_TRANSITION", msg.clone(), Some("status".to_string()))
            }
            AppError::InsufficientInventory(msg) => {
                ("INSUFFICIENT_INVENTORY", msg.clone(), Some("quantity".to_string()))
            }
            AppError::Upstream { message, .. } => ("UPSTREAM_ERROR", message.clone(), None),
            AppError::UpstreamUnavailable(_) => (
                "UPSTREAM_UNAVAILABLE",
                "The back-office service is unreachable. Please try again.".to_string(),
                None,
            ),
            AppError::UpstreamDecode(_) | AppError::Internal(_) | AppError::InternalError(_) => {
                ("INTERNAL_ERROR", FALLBACK_MESSAGE.to_string(), None)
            }
        };
        ErrorDetail {
            code: code.to_string(),
            message,
            field,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: self.detail() })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_keeps_status_and_message() {
        let err = AppError::Upstream {
            status: StatusCode::CONFLICT,
            message: "Order already merged".into(),
        };
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.detail().message, "Order already merged");
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::UpstreamDecode("missing field `_id`".into());
        assert_eq!(err.detail().message, FALLBACK_MESSAGE);
    }

    #[test]
    fn field_errors_become_validation() {
        let err: AppError = FieldError::new("quantity", "too much").into();
        let detail = err.detail();
        assert_eq!(detail.code, "VALIDATION_ERROR");
        assert_eq!(detail.field.as_deref(), Some("quantity"));
    }
}
