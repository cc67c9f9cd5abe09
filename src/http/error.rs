//! Error-to-response mapping for the HTTP surface.
//!
//! Every failure class maps to a well-formed JSON body: constraint
//! violations come back as 422 with the offending fields listed, anything
//! that went wrong on the server side as 500 with the failure description.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domain::ValidationErrors;
use crate::PremiaError;

/// HTTP-facing error for the predict pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input violated the applicant schema (422)
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Body was not parseable as an applicant payload (422)
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// Model invocation or loading failure (500)
    #[error("{0}")]
    Model(String),

    /// Anything else that went wrong server-side (500)
    #[error("{0}")]
    Internal(String),
}

impl From<PremiaError> for ApiError {
    fn from(err: PremiaError) -> Self {
        match err {
            PremiaError::Validation(errors) => Self::Validation(errors),
            PremiaError::Model(e) => Self::Model(e.to_string()),
            PremiaError::ModelNotLoaded(msg) => Self::Model(format!("Model not loaded: {msg}")),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "validation failed",
                    "details": errors.0,
                })),
            )
                .into_response(),
            Self::MalformedBody(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": msg })),
            )
                .into_response(),
            Self::Model(msg) | Self::Internal(msg) => {
                tracing::error!("Request failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": msg })),
                )
                    .into_response()
            }
        }
    }
}
