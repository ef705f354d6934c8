//! Error handling for the crop cycle planning API
//!
//! Client errors carry a descriptive message. Server errors return a generic
//! message; the detail only goes to the log.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{invalid_fields, missing_fields_message, FeatureError, ScheduleError};
use thiserror::Error;
use validator::ValidationErrors;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<String>,
    },

    #[error("Unknown crop type '{crop}'")]
    UnknownCrop {
        crop: String,
        available: Vec<String>,
    },

    // Model errors
    #[error("Models unavailable: {0}")]
    ModelsUnavailable(String),

    #[error("Inference error: {0}")]
    Inference(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Validation failure on a single field
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            fields: vec![field.to_string()],
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = invalid_fields(&errors);
        AppError::Validation {
            message: missing_fields_message(&fields),
            fields,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            message: format!("Invalid JSON body: {}", rejection.body_text()),
            fields: Vec::new(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation {
            message: format!("Invalid query string: {}", rejection.body_text()),
            fields: Vec::new(),
        }
    }
}

impl From<FeatureError> for AppError {
    fn from(err: FeatureError) -> Self {
        match err {
            FeatureError::UnknownCrop { crop, available } => {
                AppError::UnknownCrop { crop, available }
            }
            other => AppError::Inference(other.to_string()),
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::Inference(err.to_string())
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_crops: Option<Vec<String>>,
}

impl ErrorResponse {
    fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            fields: None,
            available_crops: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation { message, fields } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    fields: (!fields.is_empty()).then(|| fields.clone()),
                    ..ErrorResponse::new("VALIDATION_ERROR", message.clone())
                },
            ),
            AppError::UnknownCrop { crop, available } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    available_crops: Some(available.clone()),
                    ..ErrorResponse::new(
                        "UNKNOWN_CROP",
                        format!(
                            "Unknown crop type '{}'. Available crops: {}",
                            crop,
                            available.join(", ")
                        ),
                    )
                },
            ),
            AppError::ModelsUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(
                    "MODELS_UNAVAILABLE",
                    "Prediction models are not available",
                ),
            ),
            AppError::Inference(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("INFERENCE_ERROR", "Prediction failed"),
            ),
            AppError::Internal(_) | AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("INTERNAL_ERROR", "An internal server error occurred"),
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
