use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lariat_core::{ShortenerError, StorageError};
use serde::Serialize;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// No mapping exists for the requested short code.
    NotFound,
    Shortener(ShortenerError),
}

impl From<ShortenerError> for AppError {
    fn from(err: ShortenerError) -> Self {
        Self::Shortener(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "URL not found".to_string()),
            AppError::Shortener(ShortenerError::InvalidInput(message)) => {
                (StatusCode::BAD_REQUEST, message)
            }
            // A code that fails validation cannot exist in the store.
            AppError::Shortener(ShortenerError::InvalidShortCode(_)) => {
                (StatusCode::NOT_FOUND, "URL not found".to_string())
            }
            AppError::Shortener(err @ ShortenerError::ExhaustedRetries { .. }) => {
                error!(%err, "failed to assign a short code");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Shortener(ShortenerError::Storage(err)) => {
                error!(%err, "storage error");
                match err {
                    // Retryable outage, distinct from a server bug.
                    StorageError::Unavailable(_) | StorageError::Timeout(_) => (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "storage temporarily unavailable".to_string(),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal server error: storage".to_string(),
                    ),
                }
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
