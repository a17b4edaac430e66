use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

/// Project-wide error body shape
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            fields: serde_json::json!({ "message": message }),
        }
    }
}

/// Typed failures raised by handlers and services
///
/// Translation into HTTP responses happens in one place, the
/// `ResponseError` impl below; handlers only propagate with `?`.
#[derive(Debug)]
pub enum ApiError {
    /// Invalid caller-supplied input
    BadRequest(String),

    /// No record matches the given (id, owner) pair
    NotFound(String),

    /// Caller identity could not be resolved
    Unauthorized(String),

    /// Unclassified storage failure
    Database(sqlx::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                HttpResponse::BadRequest()
                    .json(ErrorResponse::with_message("Bad request", msg))
            }
            ApiError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                HttpResponse::NotFound().json(ErrorResponse::with_message("Not found", msg))
            }
            ApiError::Unauthorized(msg) => {
                warn!("Unauthorized: {}", msg);
                HttpResponse::Unauthorized()
                    .json(ErrorResponse::with_message("Authentication failed", msg))
            }
            ApiError::Database(e) => {
                // Log the full error, return a generic body
                error!("Database error: {:?}", e);
                HttpResponse::InternalServerError().json(ErrorResponse::with_message(
                    "Failed to process request",
                    "Database error occurred",
                ))
            }
        }
    }
}
