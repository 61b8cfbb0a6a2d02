use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by a screening run.
///
/// Per-resume failures never surface here: the scorer turns them into zero
/// scores. These variants are what aborts a whole run, plus `InvalidDateTime`
/// which the pipeline folds into a per-candidate interview outcome.
#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid date or time format: '{date}' '{time}'. Use YYYY-MM-DD for date and HH:MM AM/PM for time.")]
    InvalidDateTime { date: String, time: String },

    #[error("{0} is empty.")]
    EmptyInput(&'static str),

    #[error("Please upload no more than {max} resumes (got {count}).")]
    TooManyResumes { count: usize, max: usize },

    #[error("Please provide all necessary files: missing {0}.")]
    MissingInput(&'static str),

    #[error("Failed to process document {}: {message}", .path.display())]
    Document { path: PathBuf, message: String },

    #[error("Embedding failed: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScreeningError {
    pub fn document(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ScreeningError::Document {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ScreeningError> for AppError {
    fn from(err: ScreeningError) -> Self {
        match err {
            ScreeningError::TooManyResumes { .. }
            | ScreeningError::MissingInput(_)
            | ScreeningError::EmptyInput(_)
            | ScreeningError::UnsupportedFormat(_)
            | ScreeningError::InvalidDateTime { .. }
            | ScreeningError::FileNotFound(_) => AppError::Validation(err.to_string()),
            ScreeningError::Document { .. } => AppError::UnprocessableEntity(err.to_string()),
            ScreeningError::Encoding(msg) => AppError::Embedding(msg),
            ScreeningError::Io(e) => AppError::Internal(e.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Embedding(msg) => {
                tracing::error!("Embedding error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EMBEDDING_ERROR",
                    "The sentence encoder failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
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
