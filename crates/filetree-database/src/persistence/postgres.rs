//! PostgreSQL backend.

use async_trait::async_trait;
use tracing::{debug, info};

use filetree_core::result::AppResult;
use filetree_core::types::NodeId;
use filetree_entity::node::NodeChanges;

use crate::connection::DatabasePool;
use crate::repositories::{HistoryRepository, NodeRepository};

use super::{PersistedTree, TreePersistence};

/// Backend writing to the `nodes` and `node_history` tables.
#[derive(Debug, Clone)]
pub struct PgTreePersistence {
    db: DatabasePool,
    node_repo: NodeRepository,
    history_repo: HistoryRepository,
}

impl PgTreePersistence {
    /// Create the backend over an open pool.
    pub fn new(db: DatabasePool) -> Self {
        let node_repo = NodeRepository::new(db.pool().clone());
        let history_repo = HistoryRepository::new(db.pool().clone());
        Self {
            db,
            node_repo,
            history_repo,
        }
    }
}

#[async_trait]
impl TreePersistence for PgTreePersistence {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn load(&self) -> AppResult<PersistedTree> {
        let nodes = self.node_repo.find_all().await?;
        let history = self.history_repo.find_all().await?;
        info!(
            nodes = nodes.len(),
            snapshots = history.len(),
            "Loaded tree from PostgreSQL"
        );
        Ok(PersistedTree { nodes, history })
    }

    async fn commit_import(&self, changes: &NodeChanges) -> AppResult<()> {
        let mut tx = self.db.begin_write("import").await?;

        for node in &changes.upserted {
            NodeRepository::upsert(tx.conn(), node).await?;
        }
        for record in &changes.snapshots {
            HistoryRepository::insert(tx.conn(), record).await?;
        }
        tx.commit().await?;

        debug!(
            upserted = changes.upserted.len(),
            snapshots = changes.snapshots.len(),
            "Import committed"
        );
        Ok(())
    }

    async fn delete_nodes(&self, ids: &[NodeId]) -> AppResult<()> {
        let mut tx = self.db.begin_write("delete").await?;
        let removed = NodeRepository::delete_many(tx.conn(), ids).await?;
        tx.commit().await?;

        debug!(requested = ids.len(), removed, "Delete committed");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
