//! Health check handlers.

use axum::Json;

use crate::dto::response::StatusResponse;

/// GET /test
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "OK".to_string(),
    })
}
