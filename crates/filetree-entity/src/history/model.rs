//! History record model.

use serde::{Deserialize, Serialize};

use filetree_core::types::{NodeId, Timestamp};

use crate::node::{Node, NodeType};

/// Immutable snapshot of a node's observable state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Node identifier.
    pub id: NodeId,
    /// File url.
    pub url: Option<String>,
    /// Containing folder at snapshot time.
    pub parent_id: Option<NodeId>,
    /// File or folder.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Size at snapshot time (computed for folders).
    pub size: i64,
    /// Snapshot date.
    pub date: Timestamp,
}

impl HistoryRecord {
    /// Capture a node with its computed size.
    pub fn capture(node: &Node, size: i64) -> Self {
        Self {
            id: node.id,
            url: node.url.clone(),
            parent_id: node.parent_id,
            node_type: node.node_type,
            size,
            date: node.date,
        }
    }
}
