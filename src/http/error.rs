use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::application::AppError;

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure raised by the service layer
    #[error(transparent)]
    App(#[from] AppError),

    /// The request body or path could not be understood
    #[error("{0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad request".to_string(),
                Some(msg.clone()),
            ),
            ApiError::App(AppError::Validation(e)) => (
                StatusCode::BAD_REQUEST,
                "invalid input".to_string(),
                Some(e.to_string()),
            ),
            ApiError::App(e @ AppError::ClientNotFound(_)) => {
                (StatusCode::NOT_FOUND, e.to_string(), None)
            }
            ApiError::App(AppError::Database(e)) => {
                tracing::error!("Database error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database error".to_string(),
                    Some(e.to_string()),
                )
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
