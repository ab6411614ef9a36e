//! Durable storage for the tree.
//!
//! The service keeps the live tree in memory and commits every accepted
//! change set through a [`TreePersistence`] backend before making it
//! visible. The backend is selected from configuration by
//! [`PersistenceManager`].

pub mod manager;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use filetree_core::result::AppResult;
use filetree_core::types::NodeId;
use filetree_entity::history::HistoryRecord;
use filetree_entity::node::{Node, NodeChanges};

pub use manager::PersistenceManager;
pub use memory::MemoryPersistence;
pub use postgres::PgTreePersistence;

/// Everything a backend holds, as loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct PersistedTree {
    /// All live nodes.
    pub nodes: Vec<Node>,
    /// All snapshots, ascending by date within each node.
    pub history: Vec<HistoryRecord>,
}

/// Trait for tree persistence backends.
///
/// Each write method must be atomic: either everything in the call becomes
/// durable or nothing does.
#[async_trait]
pub trait TreePersistence: Send + Sync + std::fmt::Debug + 'static {
    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;

    /// Load the full persisted state.
    async fn load(&self) -> AppResult<PersistedTree>;

    /// Durably record the node upserts and snapshots of one accepted batch.
    async fn commit_import(&self, changes: &NodeChanges) -> AppResult<()>;

    /// Durably remove the given nodes together with their history.
    async fn delete_nodes(&self, ids: &[NodeId]) -> AppResult<()>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Release backend resources on shutdown.
    async fn close(&self) {}
}
