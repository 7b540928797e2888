//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use briefmark::BriefmarkError;
use serde::Serialize;
use tracing::error;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Error from the briefmark library.
    Briefmark(BriefmarkError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    /// The request needs a loaded session and there is none.
    pub fn no_session() -> Self {
        ApiError::NotFound("No file loaded. Upload a JSON file to start.".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Briefmark(e) => {
                let (status, kind) = match &e {
                    BriefmarkError::Incomplete { .. } => (StatusCode::CONFLICT, "incomplete"),
                    BriefmarkError::InvalidMark(_) => (StatusCode::BAD_REQUEST, "invalid_mark"),
                    BriefmarkError::InvalidFormat(_)
                    | BriefmarkError::InvalidRecord { .. }
                    | BriefmarkError::EmptyData(_)
                    | BriefmarkError::Json(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
                    BriefmarkError::EmptySession => (StatusCode::NOT_FOUND, "empty_session"),
                    BriefmarkError::Io { .. } | BriefmarkError::Persistence(_) => {
                        error!(error = %e, "storage failure");
                        (StatusCode::INTERNAL_SERVER_ERROR, "storage")
                    }
                };
                (status, kind, e.to_string())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<BriefmarkError> for ApiError {
    fn from(err: BriefmarkError) -> Self {
        ApiError::Briefmark(err)
    }
}
