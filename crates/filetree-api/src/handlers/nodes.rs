//! Node lookup and deletion handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use filetree_core::error::AppError;
use filetree_core::types::NodeId;
use filetree_entity::node::NodeView;

use crate::extractors::ApiPath;
use crate::state::AppState;

/// GET /nodes/{id}
pub async fn get_node(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<NodeId>,
) -> Result<Json<NodeView>, AppError> {
    let view = state.node_service.get_node(id).await?;
    Ok(Json(view))
}

/// DELETE /delete/{id}
pub async fn delete_node(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<NodeId>,
) -> Result<StatusCode, AppError> {
    state.node_service.delete(id).await?;
    Ok(StatusCode::OK)
}
