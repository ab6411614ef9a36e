//! Fixtures shared by the unit tests of this crate.

use uuid::Uuid;

use filetree_core::types::{NodeId, Timestamp};
use filetree_entity::node::{Node, NodeImport, NodeType};

pub(crate) const EPOCH: &str = "2022-01-01T00:00:00Z";

pub(crate) fn id(n: u128) -> NodeId {
    NodeId::from_uuid(Uuid::from_u128(n))
}

pub(crate) fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).expect("valid test timestamp")
}

pub(crate) fn folder(n: u128, parent: Option<u128>) -> Node {
    Node {
        id: id(n),
        node_type: NodeType::Folder,
        url: None,
        parent_id: parent.map(id),
        size: None,
        date: ts(EPOCH),
    }
}

pub(crate) fn file(n: u128, parent: Option<u128>, size: i64) -> Node {
    Node {
        id: id(n),
        node_type: NodeType::File,
        url: Some(format!("/file/{n}")),
        parent_id: parent.map(id),
        size: Some(size),
        date: ts(EPOCH),
    }
}

pub(crate) fn import_folder(n: u128, parent: Option<u128>) -> NodeImport {
    NodeImport::folder(id(n), parent.map(id))
}

pub(crate) fn import_file(n: u128, parent: Option<u128>, size: i64) -> NodeImport {
    NodeImport::file(id(n), parent.map(id), format!("/file/{n}"), size)
}
