//! Volatile backend: nothing outlives the process.

use async_trait::async_trait;
use tracing::debug;

use filetree_core::result::AppResult;
use filetree_core::types::NodeId;
use filetree_entity::node::NodeChanges;

use super::{PersistedTree, TreePersistence};

/// Backend that accepts every write and keeps nothing.
///
/// The service already holds the authoritative tree in memory, so this is
/// all that is needed for tests and throwaway instances.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence;

impl MemoryPersistence {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TreePersistence for MemoryPersistence {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> AppResult<PersistedTree> {
        Ok(PersistedTree::default())
    }

    async fn commit_import(&self, changes: &NodeChanges) -> AppResult<()> {
        debug!(
            upserted = changes.upserted.len(),
            snapshots = changes.snapshots.len(),
            "Import kept in memory only"
        );
        Ok(())
    }

    async fn delete_nodes(&self, ids: &[NodeId]) -> AppResult<()> {
        debug!(count = ids.len(), "Delete kept in memory only");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
