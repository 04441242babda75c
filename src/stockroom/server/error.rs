use crate::error::StockError;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Body of 500 responses. Internal detail is logged, never returned.
pub const GENERIC_MESSAGE: &str = "An unexpected error occurred.";

/// API error types.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upload(String),
    NotFound(String),
    Internal(String),
}

impl From<StockError> for ApiError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::ProductNotFound(id) => ApiError::NotFound(format!("Product {id} not found")),
            StockError::Upload(msg) => ApiError::Upload(msg),
            StockError::EmptyInput => ApiError::BadRequest("Empty CSV file.".to_string()),
            e if e.is_client_error() => ApiError::BadRequest(e.to_string()),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Upload(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, label, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            ApiError::Upload(msg) => (StatusCode::BAD_REQUEST, "Upload Error", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg),
            ApiError::Internal(detail) => {
                error!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    GENERIC_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: label,
            message,
        });

        (status, body).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}
