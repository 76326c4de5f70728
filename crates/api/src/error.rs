//! HTTP error mapping
//!
//! Errors are converted to JSON bodies of the form `{"detail": ...}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use storage::StorageError;
use toilet_schema::ValidationError;

use crate::controller::ControllerError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Payload failed validation (422)
    Validation(ValidationError),

    /// Controller rejected the request (status chosen by the controller)
    Rejected { status: StatusCode, message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str },

    /// Store failure (500, logged)
    Persistence(StorageError),
}

impl ApiError {
    /// Short label used for failure metrics
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Rejected { .. } => "rejected",
            Self::NotFound { .. } => "not_found",
            Self::Persistence(_) => "persistence",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "detail": e.to_string(),
                    "field": e.field(),
                }),
            ),
            Self::Rejected { status, message } => (status, json!({ "detail": message })),
            Self::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                json!({ "detail": format!("{} not found", resource) }),
            ),
            Self::Persistence(e) => {
                tracing::error!("Persistence error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::InvalidFormat(rejection.body_text()))
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => Self::NotFound { resource: "Toilet" },
            e => Self::Persistence(e),
        }
    }
}

impl From<ControllerError> for ApiError {
    fn from(e: ControllerError) -> Self {
        match e {
            ControllerError::RequestRejected { status, message } => Self::Rejected { status, message },
            ControllerError::Persistence(e) => e.into(),
        }
    }
}
