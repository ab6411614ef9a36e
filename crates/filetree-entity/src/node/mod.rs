//! Node domain entities.

pub mod batch;
pub mod model;
pub mod view;

pub use batch::{ImportBatch, NodeChanges, NodeImport};
pub use model::{Node, NodeType};
pub use view::NodeView;
