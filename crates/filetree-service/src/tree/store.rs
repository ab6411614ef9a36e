//! In-memory node store with a parent → children index.
//!
//! The store is purely relational: it never validates what it is given.
//! Callers (the batch validator and merge engine) are responsible for
//! keeping the tree well formed.

use std::collections::{BTreeSet, HashMap, HashSet};

use filetree_core::types::{NodeId, Timestamp};
use filetree_entity::node::{Node, NodeType};

/// Live nodes keyed by id.
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    nodes: HashMap<NodeId, Node>,
    /// Parent id → child ids. Ordered so child listings are reproducible.
    children: HashMap<NodeId, BTreeSet<NodeId>>,
}

impl TreeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously persisted nodes.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut store = Self::new();
        for node in nodes {
            store.upsert(node);
        }
        store
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Check whether a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Type of an existing node.
    pub fn type_of(&self, id: NodeId) -> Option<NodeType> {
        self.nodes.get(&id).map(|n| n.node_type)
    }

    /// Iterate over all nodes in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Ids of the direct children of `id`, ascending.
    pub fn child_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children.get(&id).into_iter().flatten().copied()
    }

    /// Direct children of `id`, ascending by id.
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.child_ids(id).filter_map(|child| self.nodes.get(&child))
    }

    /// Insert or replace a node, keeping the children index in step with
    /// its `parent_id`. Returns the previous version.
    pub fn upsert(&mut self, node: Node) -> Option<Node> {
        let id = node.id;
        let new_parent = node.parent_id;
        let previous = self.nodes.insert(id, node);

        let old_parent = previous.as_ref().and_then(|p| p.parent_id);
        if old_parent != new_parent {
            if let Some(old) = old_parent {
                self.unlink(old, id);
            }
            if let Some(new) = new_parent {
                self.children.entry(new).or_default().insert(id);
            }
        }

        previous
    }

    /// Set the modification date of an existing node. Returns `false` if
    /// the node does not exist.
    pub fn set_date(&mut self, id: NodeId, date: Timestamp) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.date = date;
                true
            }
            None => false,
        }
    }

    /// Remove a single node without touching its descendants.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let removed = self.nodes.remove(&id)?;
        if let Some(parent) = removed.parent_id {
            self.unlink(parent, id);
        }
        if self.children.get(&id).is_some_and(|c| c.is_empty()) {
            self.children.remove(&id);
        }
        Some(removed)
    }

    /// Remove a node and its whole subtree. Returns the removed nodes, the
    /// requested node first; empty if `id` does not exist.
    pub fn delete(&mut self, id: NodeId) -> Vec<Node> {
        if !self.contains(id) {
            return Vec::new();
        }

        let mut doomed = vec![id];
        doomed.extend(self.descendants(id));

        let mut removed = Vec::with_capacity(doomed.len());
        for node_id in doomed {
            if let Some(node) = self.nodes.remove(&node_id) {
                removed.push(node);
            }
            self.children.remove(&node_id);
        }
        if let Some(parent) = removed.first().and_then(|n| n.parent_id) {
            self.unlink(parent, id);
        }
        removed
    }

    /// Existing ancestors of `id`, nearest first. The walk is lazy, stops
    /// at a missing parent and never revisits a node.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            store: self,
            visited: HashSet::from([id]),
            next: self.nodes.get(&id).and_then(|n| n.parent_id),
        }
    }

    /// All descendants of `id` in depth-first pre-order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut stack: Vec<NodeId> = self.child_ids(id).collect();
        stack.reverse();

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            out.push(current);
            let before = stack.len();
            stack.extend(self.child_ids(current));
            stack[before..].reverse();
        }
        out
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.remove(&child);
            if siblings.is_empty() && !self.nodes.contains_key(&parent) {
                self.children.remove(&parent);
            }
        }
    }
}

/// Iterator returned by [`TreeStore::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    store: &'a TreeStore,
    visited: HashSet<NodeId>,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next.take()?;
        if !self.visited.insert(id) {
            return None;
        }
        let node = self.store.nodes.get(&id)?;
        self.next = node.parent_id;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{file, folder, id, ts};

    fn sample() -> TreeStore {
        // 1 ─┬─ 2 ── 4 (file)
        //    └─ 3 (file)
        TreeStore::from_nodes([
            folder(1, None),
            folder(2, Some(1)),
            file(3, Some(1), 10),
            file(4, Some(2), 20),
        ])
    }

    #[test]
    fn test_children_are_listed_in_id_order() {
        let store = sample();
        let children: Vec<NodeId> = store.children_of(id(1)).map(|n| n.id).collect();
        assert_eq!(children, vec![id(2), id(3)]);
        assert_eq!(store.child_ids(id(3)).count(), 0);
    }

    #[test]
    fn test_type_of() {
        let store = sample();
        assert_eq!(store.type_of(id(1)), Some(NodeType::Folder));
        assert_eq!(store.type_of(id(4)), Some(NodeType::File));
        assert_eq!(store.type_of(id(99)), None);
    }

    #[test]
    fn test_reparent_moves_index_entry() {
        let mut store = sample();
        let mut moved = store.get(id(4)).cloned().unwrap();
        moved.parent_id = Some(id(1));
        let previous = store.upsert(moved).expect("previous version");

        assert_eq!(previous.parent_id, Some(id(2)));
        assert_eq!(store.child_ids(id(2)).count(), 0);
        let children: Vec<NodeId> = store.child_ids(id(1)).collect();
        assert_eq!(children, vec![id(2), id(3), id(4)]);
    }

    #[test]
    fn test_child_registered_before_parent_exists() {
        let mut store = TreeStore::new();
        store.upsert(file(2, Some(1), 5));
        store.upsert(folder(1, None));
        assert_eq!(store.child_ids(id(1)).collect::<Vec<_>>(), vec![id(2)]);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let store = sample();
        assert_eq!(store.ancestors(id(4)).collect::<Vec<_>>(), vec![id(2), id(1)]);
        assert_eq!(store.ancestors(id(1)).count(), 0);
        assert_eq!(store.ancestors(id(99)).count(), 0);
    }

    #[test]
    fn test_ancestors_terminates_on_cycle() {
        let mut store = TreeStore::new();
        store.upsert(folder(1, Some(2)));
        store.upsert(folder(2, Some(1)));
        assert_eq!(store.ancestors(id(1)).collect::<Vec<_>>(), vec![id(2)]);
    }

    #[test]
    fn test_descendants_pre_order() {
        let store = sample();
        assert_eq!(store.descendants(id(1)), vec![id(2), id(4), id(3)]);
        assert!(store.descendants(id(3)).is_empty());
    }

    #[test]
    fn test_delete_cascades() {
        let mut store = sample();
        let removed: Vec<NodeId> = store.delete(id(2)).into_iter().map(|n| n.id).collect();
        assert_eq!(removed, vec![id(2), id(4)]);
        assert!(!store.contains(id(2)));
        assert!(!store.contains(id(4)));
        assert_eq!(store.child_ids(id(1)).collect::<Vec<_>>(), vec![id(3)]);
        assert!(store.delete(id(2)).is_empty());
    }

    #[test]
    fn test_set_date() {
        let mut store = sample();
        let date = ts("2022-02-03T00:00:00Z");
        assert!(store.set_date(id(2), date));
        assert_eq!(store.get(id(2)).unwrap().date, date);
        assert!(!store.set_date(id(99), date));
    }

    #[test]
    fn test_remove_single_node_keeps_children() {
        let mut store = sample();
        store.remove(id(2)).expect("removed");
        assert!(store.contains(id(4)));
        assert_eq!(store.child_ids(id(1)).collect::<Vec<_>>(), vec![id(3)]);
    }
}
