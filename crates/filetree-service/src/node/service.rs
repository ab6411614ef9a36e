//! Node service: the single entry point for tree reads and writes.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use filetree_core::error::AppError;
use filetree_core::types::{NodeId, Timestamp};
use filetree_database::persistence::TreePersistence;
use filetree_entity::history::HistoryRecord;
use filetree_entity::node::{ImportBatch, Node, NodeType, NodeView};

use crate::history::HistoryStore;
use crate::import::{BatchValidator, MergeEngine};
use crate::tree::{SizeAggregator, TreeStore};

/// Length of the trailing window used by [`NodeService::recent_updates`].
pub const UPDATES_WINDOW_HOURS: i64 = 24;

/// The in-memory tree together with its history.
#[derive(Debug, Default)]
pub struct TreeState {
    /// Live nodes.
    pub tree: TreeStore,
    /// Snapshots of every node.
    pub history: HistoryStore,
}

/// Owns the tree and serializes every mutation through one write lock.
///
/// Writes are made durable through the persistence backend before the lock
/// is released, so readers only ever see whole batches.
#[derive(Debug, Clone)]
pub struct NodeService {
    /// Tree and history behind a single lock.
    state: Arc<RwLock<TreeState>>,
    /// Durable storage backend.
    persistence: Arc<dyn TreePersistence>,
}

impl NodeService {
    /// Creates a service with an empty tree.
    pub fn new(persistence: Arc<dyn TreePersistence>) -> Self {
        Self {
            state: Arc::new(RwLock::new(TreeState::default())),
            persistence,
        }
    }

    /// Creates a service seeded with everything the backend holds.
    pub async fn load(persistence: Arc<dyn TreePersistence>) -> Result<Self, AppError> {
        let persisted = persistence.load().await?;
        info!(
            backend = persistence.backend_name(),
            nodes = persisted.nodes.len(),
            history = persisted.history.len(),
            "Loaded persisted tree"
        );

        let state = TreeState {
            tree: TreeStore::from_nodes(persisted.nodes),
            history: HistoryStore::from_records(persisted.history),
        };
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            persistence,
        })
    }

    /// Validates and applies an import batch. Returns the number of nodes
    /// the batch affected.
    pub async fn import(&self, batch: ImportBatch) -> Result<usize, AppError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let validated = BatchValidator::new(&state.tree).validate(&batch);
        let merged = match validated {
            Ok(()) => MergeEngine::new(&mut state.tree).apply(&batch),
            Err(e) => Err(e),
        };
        let outcome = match merged {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    items = batch.items.len(),
                    reason = %e.kind,
                    detail = %e.message,
                    "Import batch rejected"
                );
                return Err(e);
            }
        };
        if let Err(e) = self.persistence.commit_import(&outcome.changes).await {
            error!(
                backend = self.persistence.backend_name(),
                error = %e,
                "Failed to persist import batch, reverting"
            );
            outcome.undo.revert(&mut state.tree);
            return Err(e);
        }

        let affected = outcome.changes.upserted.len();
        state.history.extend(outcome.changes.snapshots);

        info!(
            items = batch.items.len(),
            affected,
            update_date = %batch.update_date,
            "Import batch accepted"
        );
        Ok(affected)
    }

    /// Returns a node with its computed size and, for folders, its full
    /// subtree.
    pub async fn get_node(&self, id: NodeId) -> Result<NodeView, AppError> {
        let state = self.state.read().await;
        let tree = &state.tree;
        if !tree.contains(id) {
            return Err(not_found());
        }

        let mut order = vec![id];
        order.extend(tree.descendants(id));

        // Children follow their parent in pre-order, so walking backwards
        // builds every child view before the view that owns it.
        let mut sizes = SizeAggregator::new(tree);
        let mut built: HashMap<NodeId, NodeView> = HashMap::with_capacity(order.len());
        for node_id in order.into_iter().rev() {
            let Some(node) = tree.get(node_id) else {
                continue;
            };
            let children = tree
                .child_ids(node_id)
                .filter_map(|child| built.remove(&child))
                .collect();
            let size = sizes
                .size_of(node_id)
                .map_err(|e| AppError::internal(e.message))?
                .unwrap_or(0);
            built.insert(node_id, NodeView::new(node, size, children));
        }

        built.remove(&id).ok_or_else(not_found)
    }

    /// Deletes a node and its whole subtree, history included.
    pub async fn delete(&self, id: NodeId) -> Result<(), AppError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        if !state.tree.contains(id) {
            return Err(not_found());
        }

        let mut ids = vec![id];
        ids.extend(state.tree.descendants(id));

        if let Err(e) = self.persistence.delete_nodes(&ids).await {
            error!(
                backend = self.persistence.backend_name(),
                node_id = %id,
                error = %e,
                "Failed to persist node deletion"
            );
            return Err(e);
        }

        let removed = state.tree.delete(id);
        let snapshots: usize = removed
            .iter()
            .map(|node| state.history.delete_all_for(node.id))
            .sum();

        info!(node_id = %id, nodes = removed.len(), snapshots, "Node deleted");
        Ok(())
    }

    /// Files whose date lies in the 24 hours up to and including `date`,
    /// ordered by date then id.
    pub async fn recent_updates(&self, date: Timestamp) -> Vec<Node> {
        let since = date.saturating_sub(Duration::hours(UPDATES_WINDOW_HOURS));
        let state = self.state.read().await;

        let mut files: Vec<Node> = state
            .tree
            .nodes()
            .filter(|n| n.node_type == NodeType::File && n.date >= since && n.date <= date)
            .cloned()
            .collect();
        files.sort_by_key(|n| (n.date, n.id));
        files
    }

    /// Snapshots of a node with `start <= date < end`, oldest first.
    pub async fn history(
        &self,
        id: NodeId,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> Result<Vec<HistoryRecord>, AppError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(AppError::validation(format!(
                    "dateStart {s} is after dateEnd {e}"
                )));
            }
        }

        let state = self.state.read().await;
        if !state.tree.contains(id) {
            return Err(not_found());
        }
        Ok(state
            .history
            .by_id_and_range(id, start, end)
            .cloned()
            .collect())
    }

    /// Checks the persistence backend.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        self.persistence.health_check().await
    }

    /// Number of live nodes.
    pub async fn node_count(&self) -> usize {
        self.state.read().await.tree.len()
    }
}

fn not_found() -> AppError {
    AppError::not_found("Item not found")
}
