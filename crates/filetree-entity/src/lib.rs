//! # filetree-entity
//!
//! Domain entity models for FileTree. Every struct in this crate is either a
//! persisted row (nodes, history records) or a value object exchanged between
//! the service and API layers (import batches, node views, change sets).

pub mod history;
pub mod node;

pub use history::HistoryRecord;
pub use node::{ImportBatch, Node, NodeChanges, NodeImport, NodeType, NodeView};
