//! Response DTOs.

use serde::{Deserialize, Serialize};

/// `{"items": [...]}` list wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse<T> {
    /// Listed items.
    pub items: Vec<T>,
}

impl<T> ItemsResponse<T> {
    /// Wraps a list.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `"OK"` when the server answers.
    #[serde(rename = "Status")]
    pub status: String,
}
