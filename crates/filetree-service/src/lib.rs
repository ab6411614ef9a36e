//! # filetree-service
//!
//! The tree-consistency and aggregation engine for FileTree.
//!
//! - [`tree`]: the in-memory node store and the folder size aggregator.
//! - [`history`]: the append-only snapshot store.
//! - [`import`]: batch validation and the merge/propagation engine.
//! - [`node`]: [`NodeService`], the single-writer facade used by the API.
//!
//! Services follow constructor injection: the persistence backend is
//! provided at construction time as an `Arc<dyn TreePersistence>`.

pub mod history;
pub mod import;
pub mod node;
pub mod tree;

pub use history::HistoryStore;
pub use import::{BatchValidator, MergeEngine};
pub use node::NodeService;
pub use tree::{SizeAggregator, TreeStore};

#[cfg(test)]
pub(crate) mod testing;
