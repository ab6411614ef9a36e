//! Import batches and the change sets they produce.

use serde::{Deserialize, Serialize};

use filetree_core::types::{NodeId, Timestamp};

use crate::history::HistoryRecord;

use super::model::{Node, NodeType};

/// One proposed node record inside an import batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeImport {
    /// Node identifier.
    pub id: NodeId,
    /// File url; must be absent for folders.
    #[serde(default)]
    pub url: Option<String>,
    /// Containing folder.
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    /// File or folder.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// File size; must be absent for folders.
    #[serde(default)]
    pub size: Option<i64>,
}

impl NodeImport {
    /// A folder item.
    pub fn folder(id: NodeId, parent_id: Option<NodeId>) -> Self {
        Self {
            id,
            url: None,
            parent_id,
            node_type: NodeType::Folder,
            size: None,
        }
    }

    /// A file item.
    pub fn file(id: NodeId, parent_id: Option<NodeId>, url: impl Into<String>, size: i64) -> Self {
        Self {
            id,
            url: Some(url.into()),
            parent_id,
            node_type: NodeType::File,
            size: Some(size),
        }
    }
}

/// An ordered list of items sharing one update timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBatch {
    /// Items in the order they were submitted.
    pub items: Vec<NodeImport>,
    /// Timestamp applied to every imported and cascaded node.
    pub update_date: Timestamp,
}

impl ImportBatch {
    /// Create a batch.
    pub fn new(items: Vec<NodeImport>, update_date: Timestamp) -> Self {
        Self { items, update_date }
    }
}

/// Everything an accepted batch changed, ready to be made durable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeChanges {
    /// Final state of every node imported or cascaded to.
    pub upserted: Vec<Node>,
    /// One snapshot per affected node.
    pub snapshots: Vec<HistoryRecord>,
}

impl NodeChanges {
    /// Ids of all affected nodes.
    pub fn affected_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.upserted.iter().map(|n| n.id)
    }
}
