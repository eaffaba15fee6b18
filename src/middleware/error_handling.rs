use crate::error::AppError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Structured error body returned to clients. Internal details (store
/// errors, hash internals) never appear here.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
    pub code: &'static str,
}

// Map domain errors to HTTP responses
pub fn map_error(err: &AppError) -> (StatusCode, ErrorResponse) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let code = match err {
        AppError::BadRequest(_) => "INVALID_REQUEST",
        AppError::InvalidCredentials => "INVALID_CREDENTIALS",
        AppError::Unauthorized => "UNAUTHORIZED",
        AppError::Forbidden => "FORBIDDEN",
        AppError::NotFound => "NOT_FOUND",
        AppError::Conflict => "USERNAME_TAKEN",
        AppError::Config(_) | AppError::StartServer(_) => "INTERNAL_SERVER_ERROR",
        AppError::Database(_) => "DATABASE_ERROR",
        AppError::Internal => "INTERNAL_SERVER_ERROR",
    };

    // Opaque message for server-side failures
    let message = match err {
        AppError::Database(e) => {
            tracing::error!(error = %e, "database error");
            "internal server error".to_string()
        }
        AppError::Config(_) | AppError::StartServer(_) | AppError::Internal => {
            "internal server error".to_string()
        }
        other => other.to_string(),
    };

    let response = ErrorResponse {
        error: match status {
            StatusCode::BAD_REQUEST => "Bad Request",
            StatusCode::UNAUTHORIZED => "Unauthorized",
            StatusCode::FORBIDDEN => "Forbidden",
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::CONFLICT => "Conflict",
            StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
            _ => "Error",
        }
        .to_string(),
        message,
        status: status.as_u16(),
        code,
    };

    (status, response)
}

pub fn into_response(err: AppError) -> impl IntoResponse {
    let (status, response) = map_error(&err);
    (status, Json(response))
}
