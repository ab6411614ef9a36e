//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use filetree_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// HTTP status code, repeated in the body.
    pub code: u16,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation
        | ErrorKind::DuplicateInBatch
        | ErrorKind::FileCannotBeParent
        | ErrorKind::TypeChangeForbidden
        | ErrorKind::InvalidShape
        | ErrorKind::ImpossibleParentLink => StatusCode::BAD_REQUEST,
        ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind);
        if status.is_server_error() {
            tracing::error!(kind = %self.kind, error = %self.message, "Internal server error");
        }

        let body = ApiErrorResponse {
            code: status.as_u16(),
            message: self.message,
        };

        (status, Json(body)).into_response()
    }
}
