//! Recently updated files.

use axum::Json;
use axum::extract::State;

use filetree_entity::node::Node;

use crate::dto::request::UpdatesQuery;
use crate::dto::response::ItemsResponse;
use crate::extractors::ApiQuery;
use crate::state::AppState;

/// GET /updates?date=...
pub async fn recent_updates(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UpdatesQuery>,
) -> Json<ItemsResponse<Node>> {
    let files = state.node_service.recent_updates(query.date).await;
    Json(ItemsResponse::new(files))
}
