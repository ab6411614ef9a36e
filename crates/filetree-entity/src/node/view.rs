//! Read-side node tree returned by node lookups.

use serde::{Deserialize, Serialize};

use filetree_core::types::{NodeId, Timestamp};

use super::model::{Node, NodeType};

/// A node with its computed size and, for folders, its children.
///
/// Folders always carry a `children` array (possibly empty); files carry
/// `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    /// Node identifier.
    pub id: NodeId,
    /// File url.
    pub url: Option<String>,
    /// Containing folder.
    pub parent_id: Option<NodeId>,
    /// File or folder.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Own size for files, subtree sum for folders.
    pub size: i64,
    /// Last modification.
    pub date: Timestamp,
    /// Child nodes.
    pub children: Option<Vec<NodeView>>,
}

impl NodeView {
    /// Build a view from a node, its computed size, and its children views.
    pub fn new(node: &Node, size: i64, children: Vec<NodeView>) -> Self {
        Self {
            id: node.id,
            url: node.url.clone(),
            parent_id: node.parent_id,
            node_type: node.node_type,
            size,
            date: node.date,
            children: node.is_folder().then_some(children),
        }
    }
}
