//! Route definitions for the FileTree HTTP API.
//!
//! Routes are mounted at the root, or under `server.api_prefix` when one is
//! configured.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    let server = &config.server;

    let routes = Router::new()
        .merge(node_routes())
        .merge(health_routes());

    let routes = match normalize_prefix(&server.api_prefix) {
        Some(prefix) => Router::new().nest(&prefix, routes),
        None => routes,
    };

    routes
        .fallback(handlers::fallback)
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&server.cors))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Import, lookup, deletion, and history endpoints
fn node_routes() -> Router<AppState> {
    Router::new()
        .route("/imports", post(handlers::imports::import_nodes))
        .route("/nodes/{id}", get(handlers::nodes::get_node))
        .route("/delete/{id}", delete(handlers::nodes::delete_node))
        .route("/updates", get(handlers::updates::recent_updates))
        .route("/node/{id}/history", get(handlers::history::node_history))
}

/// Liveness probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/test", get(handlers::health::status))
}

/// `""` and `"/"` mean no prefix; anything else gets exactly one leading
/// slash and no trailing slash.
fn normalize_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim_matches('/');
    (!trimmed.is_empty()).then(|| format!("/{trimmed}"))
}
