//! Node entity model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use filetree_core::error::AppError;
use filetree_core::types::{NodeId, Timestamp};

use super::batch::NodeImport;

/// Kind of a node. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeType {
    /// A leaf carrying a url and a size.
    File,
    /// A container whose size is derived from its descendants.
    Folder,
}

impl NodeType {
    /// Database/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::Folder => "FOLDER",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FILE" => Ok(Self::File),
            "FOLDER" => Ok(Self::Folder),
            other => Err(AppError::validation(format!("Unknown node type: {other}"))),
        }
    }
}

/// A file or folder as held by the tree.
///
/// For folders `url` and `size` are always `None`; the size reported to
/// clients is computed from the subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node identifier.
    pub id: NodeId,
    /// File or folder.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// File url (files only).
    pub url: Option<String>,
    /// Containing folder, `None` for a root.
    pub parent_id: Option<NodeId>,
    /// File size (files only).
    pub size: Option<i64>,
    /// Last modification, cascaded up from descendants.
    pub date: Timestamp,
}

impl Node {
    /// Build a new node from an import item.
    pub fn from_import(item: &NodeImport, date: Timestamp) -> Self {
        Self {
            id: item.id,
            node_type: item.node_type,
            url: item.url.clone(),
            parent_id: item.parent_id,
            size: item.size,
            date,
        }
    }

    /// Overwrite the mutable fields from an import item. The type is left
    /// untouched.
    pub fn apply_import(&mut self, item: &NodeImport, date: Timestamp) {
        self.url = item.url.clone();
        self.parent_id = item.parent_id;
        self.size = item.size;
        self.date = date;
    }

    /// Check if this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.node_type == NodeType::Folder
    }
}
