//! Batch import handler.

use axum::extract::State;
use axum::http::StatusCode;

use filetree_core::error::AppError;
use filetree_entity::node::ImportBatch;

use crate::extractors::ApiJson;
use crate::state::AppState;

/// POST /imports
pub async fn import_nodes(
    State(state): State<AppState>,
    ApiJson(batch): ApiJson<ImportBatch>,
) -> Result<StatusCode, AppError> {
    state.node_service.import(batch).await?;
    Ok(StatusCode::OK)
}
