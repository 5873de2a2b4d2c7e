use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::matching::extractor::ExtractionError;
use crate::storage::FetchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Resume fetch failed: {0}")]
    ResumeFetch(#[from] FetchError),

    #[error("Text extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingInput(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::JobNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ResumeFetch(_) | AppError::Extraction(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message) = match &self {
            AppError::MissingInput(msg) => ("MISSING_INPUT", msg.clone()),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::JobNotFound(id) => ("JOB_NOT_FOUND", format!("Job {id} not found")),
            AppError::ResumeFetch(e) => {
                tracing::error!("Resume fetch error: {e}");
                ("RESUME_FETCH_FAILED", e.to_string())
            }
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {e}");
                ("EXTRACTION_FAILED", e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
