//! Application state shared across all handlers.

use std::sync::Arc;

use filetree_core::config::AppConfig;
use filetree_service::NodeService;

/// Application state passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Tree reads and writes
    pub node_service: Arc<NodeService>,
}

impl AppState {
    /// Creates the state from its parts.
    pub fn new(config: AppConfig, node_service: NodeService) -> Self {
        Self {
            config: Arc::new(config),
            node_service: Arc::new(node_service),
        }
    }
}
