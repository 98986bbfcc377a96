use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;

use crate::models::ListingId;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid rating {rating}: must be between {min} and {max}")]
    InvalidRating { rating: f64, min: f64, max: f64 },

    #[error("Insufficient training data: no catalog listing has feedback")]
    InsufficientTrainingData,

    #[error("Failed to persist feedback: {0}")]
    Persistence(std::io::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Listing not found: {0}")]
    ListingNotFound(ListingId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model training exceeded {0} ms, retry later")]
    TrainingTimeout(u64),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRating { .. } | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::ListingNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientTrainingData => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::TrainingTimeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Notification(_) => StatusCode::BAD_GATEWAY,
            AppError::Persistence(_)
            | AppError::Read { .. }
            | AppError::Serialization(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
