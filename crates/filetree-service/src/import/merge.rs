//! Merge and date propagation for validated import batches.

use std::collections::HashSet;
use std::iter;

use filetree_core::result::AppResult;
use filetree_core::types::{NodeId, Timestamp};
use filetree_entity::history::HistoryRecord;
use filetree_entity::node::{ImportBatch, Node, NodeChanges};

use crate::tree::{SizeAggregator, TreeStore};

/// Pre-merge state of every node a batch touched, in first-touch order.
#[derive(Debug, Default)]
pub struct UndoLog {
    entries: Vec<(NodeId, Option<Node>)>,
    seen: HashSet<NodeId>,
}

impl UndoLog {
    fn record(&mut self, store: &TreeStore, id: NodeId) {
        if self.seen.insert(id) {
            self.entries.push((id, store.get(id).cloned()));
        }
    }

    fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Put `store` back into its pre-merge state.
    pub fn revert(self, store: &mut TreeStore) {
        for (id, previous) in self.entries.into_iter().rev() {
            match previous {
                Some(node) => {
                    store.upsert(node);
                }
                None => {
                    store.remove(id);
                }
            }
        }
    }
}

/// Result of merging one batch.
#[derive(Debug)]
pub struct MergeOutcome {
    /// Final node states and snapshots to persist.
    pub changes: NodeChanges,
    /// How to undo the merge if persisting fails.
    pub undo: UndoLog,
}

/// Applies a validated batch to a tree store.
///
/// Every imported node gets the batch date, and so does every ancestor it
/// ends up under. A node moved to a new parent also dates its former parent
/// chain, whose size just changed.
#[derive(Debug)]
pub struct MergeEngine<'a> {
    store: &'a mut TreeStore,
}

impl<'a> MergeEngine<'a> {
    /// Create an engine that mutates `store`.
    pub fn new(store: &'a mut TreeStore) -> Self {
        Self { store }
    }

    /// Merge `batch`. The batch must already have passed validation.
    ///
    /// If a snapshot size cannot be computed the store is reverted before
    /// the error is returned.
    pub fn apply(mut self, batch: &ImportBatch) -> AppResult<MergeOutcome> {
        let date = batch.update_date;
        let mut undo = UndoLog::default();
        // Nodes whose current ancestor chain already carries `date`.
        let mut dated = HashSet::new();

        for item in &batch.items {
            undo.record(self.store, item.id);

            let former_parent = match self.store.get(item.id) {
                Some(existing) => {
                    let mut node = existing.clone();
                    let former = node.parent_id.filter(|p| Some(*p) != item.parent_id);
                    node.apply_import(item, date);
                    self.store.upsert(node);
                    former
                }
                None => {
                    self.store.upsert(Node::from_import(item, date));
                    None
                }
            };
            dated.insert(item.id);

            self.cascade(item.parent_id, date, &mut undo, &mut dated);
            if former_parent.is_some() {
                self.cascade(former_parent, date, &mut undo, &mut dated);
            }
        }

        match self.collect(&undo) {
            Ok(changes) => Ok(MergeOutcome { changes, undo }),
            Err(e) => {
                undo.revert(self.store);
                Err(e)
            }
        }
    }

    /// Date `from` and its ancestors, stopping at a missing node or at one
    /// already dated by this batch.
    fn cascade(
        &mut self,
        from: Option<NodeId>,
        date: Timestamp,
        undo: &mut UndoLog,
        dated: &mut HashSet<NodeId>,
    ) {
        let Some(start) = from.filter(|id| self.store.contains(*id)) else {
            return;
        };
        let chain: Vec<NodeId> = iter::once(start)
            .chain(self.store.ancestors(start))
            .take_while(|id| !dated.contains(id))
            .collect();

        for id in chain {
            dated.insert(id);
            undo.record(self.store, id);
            self.store.set_date(id, date);
        }
    }

    fn collect(&self, undo: &UndoLog) -> AppResult<NodeChanges> {
        let mut sizes = SizeAggregator::new(&*self.store);
        let mut changes = NodeChanges::default();

        for id in undo.ids() {
            let Some(node) = self.store.get(id) else {
                continue;
            };
            let size = sizes.size_of(id)?.unwrap_or(0);
            changes.snapshots.push(HistoryRecord::capture(node, size));
            changes.upserted.push(node.clone());
        }
        Ok(changes)
    }
}
