//! Folder size aggregation.

use std::collections::{HashMap, HashSet};

use filetree_core::error::AppError;
use filetree_core::result::AppResult;
use filetree_core::types::NodeId;
use filetree_entity::node::NodeType;

use super::store::TreeStore;

/// Computes effective node sizes over one consistent view of the store.
///
/// A file's size is its stored size; a folder's size is the sum over its
/// children, 0 when empty. A folder whose total does not fit in an `i64`
/// is an `InvalidShape` error. Results are memoized for the lifetime of the
/// aggregator, so create one per request: every node is visited at most
/// once no matter how many sizes are asked for.
#[derive(Debug)]
pub struct SizeAggregator<'a> {
    store: &'a TreeStore,
    memo: HashMap<NodeId, i64>,
}

impl<'a> SizeAggregator<'a> {
    /// Create an aggregator over `store`.
    pub fn new(store: &'a TreeStore) -> Self {
        Self {
            store,
            memo: HashMap::new(),
        }
    }

    /// Effective size of `id`, or `None` if the node does not exist.
    pub fn size_of(&mut self, id: NodeId) -> AppResult<Option<i64>> {
        if !self.store.contains(id) {
            return Ok(None);
        }
        if let Some(size) = self.memo.get(&id) {
            return Ok(Some(*size));
        }

        // Post-order walk with an explicit stack. `expanded` marks a folder
        // whose children have already been pushed.
        let mut stack = vec![(id, false)];
        let mut in_progress = HashSet::new();

        while let Some((current, expanded)) = stack.pop() {
            if self.memo.contains_key(&current) {
                continue;
            }
            let Some(node) = self.store.get(current) else {
                self.memo.insert(current, 0);
                continue;
            };

            match node.node_type {
                NodeType::File => {
                    self.memo.insert(current, node.size.unwrap_or(0));
                }
                NodeType::Folder if expanded => {
                    let mut total: i64 = 0;
                    for child in self.store.child_ids(current) {
                        let size = self.memo.get(&child).copied().unwrap_or(0);
                        total = total.checked_add(size).ok_or_else(|| {
                            AppError::invalid_shape(format!(
                                "Size of folder {current} exceeds {}",
                                i64::MAX
                            ))
                        })?;
                    }
                    in_progress.remove(&current);
                    self.memo.insert(current, total);
                }
                NodeType::Folder => {
                    in_progress.insert(current);
                    stack.push((current, true));
                    for child in self.store.child_ids(current) {
                        if !self.memo.contains_key(&child) && !in_progress.contains(&child) {
                            stack.push((child, false));
                        }
                    }
                }
            }
        }

        Ok(self.memo.get(&id).copied())
    }
}
