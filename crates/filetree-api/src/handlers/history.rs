//! Node history handler.

use axum::Json;
use axum::extract::State;

use filetree_core::error::AppError;
use filetree_core::types::NodeId;
use filetree_entity::history::HistoryRecord;

use crate::dto::request::HistoryQuery;
use crate::dto::response::ItemsResponse;
use crate::extractors::{ApiPath, ApiQuery};
use crate::state::AppState;

/// GET /node/{id}/history?dateStart=...&dateEnd=...
pub async fn node_history(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<NodeId>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<Json<ItemsResponse<HistoryRecord>>, AppError> {
    let records = state
        .node_service
        .history(id, query.date_start, query.date_end)
        .await?;
    Ok(Json(ItemsResponse::new(records)))
}
