//! Import batch validation.
//!
//! A batch is checked in full against the current tree before anything is
//! merged; the first violation rejects the whole batch.

use std::collections::{HashMap, HashSet};

use filetree_core::error::AppError;
use filetree_core::result::AppResult;
use filetree_core::types::NodeId;
use filetree_entity::node::{ImportBatch, NodeImport, NodeType};

use crate::tree::TreeStore;

/// Maximum url length for a file, in characters.
pub const MAX_URL_LEN: usize = 255;

/// Decides whether a batch may be merged into a tree.
#[derive(Debug, Clone, Copy)]
pub struct BatchValidator<'a> {
    store: &'a TreeStore,
}

impl<'a> BatchValidator<'a> {
    /// Create a validator over the current tree.
    pub fn new(store: &'a TreeStore) -> Self {
        Self { store }
    }

    /// Accept the batch or return the first rejection.
    pub fn validate(&self, batch: &ImportBatch) -> AppResult<()> {
        for item in &batch.items {
            check_shape(item)?;
        }

        let mut seen_ids = HashSet::new();
        let mut missing_parents: Vec<(NodeId, NodeId)> = Vec::new();
        let mut file_ids = HashSet::new();

        for item in &batch.items {
            if !seen_ids.insert(item.id) {
                return Err(AppError::duplicate_in_batch(format!(
                    "Item {} appears more than once in the batch",
                    item.id
                )));
            }
            if item.node_type == NodeType::File {
                file_ids.insert(item.id);
            }

            if let Some(parent_id) = item.parent_id {
                if parent_id == item.id {
                    return Err(AppError::impossible_parent_link(format!(
                        "Item {} can't be its own parent",
                        item.id
                    )));
                }
                match self.store.type_of(parent_id) {
                    Some(NodeType::File) => {
                        return Err(AppError::file_cannot_be_parent(format!(
                            "File {parent_id} can't be a parent of {}",
                            item.id
                        )));
                    }
                    Some(NodeType::Folder) => {}
                    None => missing_parents.push((item.id, parent_id)),
                }
            }

            if let Some(stored) = self.store.type_of(item.id) {
                if stored != item.node_type {
                    return Err(AppError::type_change_forbidden(format!(
                        "Can't change type of item {} from {stored} to {}",
                        item.id, item.node_type
                    )));
                }
            }
        }

        for (child, parent) in &missing_parents {
            if !seen_ids.contains(parent) {
                return Err(AppError::impossible_parent_link(format!(
                    "Parent {parent} of item {child} does not exist"
                )));
            }
        }
        for (child, parent) in &missing_parents {
            if file_ids.contains(parent) {
                return Err(AppError::file_cannot_be_parent(format!(
                    "File {parent} can't be a parent of {child}"
                )));
            }
        }

        self.check_acyclic(batch)
    }

    /// Walk the post-batch parent chain of every imported item; reaching a
    /// node twice means the batch would close a cycle.
    fn check_acyclic(&self, batch: &ImportBatch) -> AppResult<()> {
        let incoming: HashMap<NodeId, Option<NodeId>> = batch
            .items
            .iter()
            .map(|item| (item.id, item.parent_id))
            .collect();
        let parent_of = |id: NodeId| match incoming.get(&id) {
            Some(parent) => *parent,
            None => self.store.get(id).and_then(|n| n.parent_id),
        };

        let mut rooted: HashSet<NodeId> = HashSet::new();
        for item in &batch.items {
            let mut path = vec![item.id];
            let mut on_path = HashSet::from([item.id]);
            let mut current = parent_of(item.id);

            while let Some(parent) = current {
                if rooted.contains(&parent) {
                    break;
                }
                if !on_path.insert(parent) {
                    return Err(AppError::impossible_parent_link(format!(
                        "Placing item {} under {parent} would create a cycle",
                        item.id
                    )));
                }
                path.push(parent);
                current = parent_of(parent);
            }
            rooted.extend(path);
        }
        Ok(())
    }
}

/// Check that url and size match the item type.
fn check_shape(item: &NodeImport) -> AppResult<()> {
    match item.node_type {
        NodeType::Folder => {
            if item.url.is_some() {
                return Err(AppError::invalid_shape(format!(
                    "Folder {} must not have a url",
                    item.id
                )));
            }
            if item.size.is_some() {
                return Err(AppError::invalid_shape(format!(
                    "Folder {} must not have a size",
                    item.id
                )));
            }
        }
        NodeType::File => {
            match item.size {
                Some(size) if size > 0 => {}
                _ => {
                    return Err(AppError::invalid_shape(format!(
                        "File {} must have a positive size",
                        item.id
                    )));
                }
            }
            match item.url.as_deref() {
                Some(url) if !url.is_empty() && url.chars().count() <= MAX_URL_LEN => {}
                _ => {
                    return Err(AppError::invalid_shape(format!(
                        "File {} must have a url of 1 to {MAX_URL_LEN} characters",
                        item.id
                    )));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetree_core::error::ErrorKind;

    use crate::testing::{EPOCH, file, folder, import_file, import_folder, ts};

    fn batch(items: Vec<NodeImport>) -> ImportBatch {
        ImportBatch::new(items, ts(EPOCH))
    }

    fn rejection(store: &TreeStore, items: Vec<NodeImport>) -> ErrorKind {
        BatchValidator::new(store)
            .validate(&batch(items))
            .expect_err("batch should be rejected")
            .kind
    }

    fn existing() -> TreeStore {
        TreeStore::from_nodes([folder(1, None), file(2, Some(1), 10)])
    }

    #[test]
    fn test_accepts_well_formed_batch() {
        let store = existing();
        let items = vec![
            import_folder(3, Some(1)),
            import_file(4, Some(3), 5),
            import_file(2, Some(3), 11),
        ];
        BatchValidator::new(&store)
            .validate(&batch(items))
            .expect("valid batch");
    }

    #[test]
    fn test_accepts_forward_reference_to_later_folder() {
        let store = TreeStore::new();
        let items = vec![import_file(2, Some(1), 5), import_folder(1, None)];
        BatchValidator::new(&store)
            .validate(&batch(items))
            .expect("valid batch");
    }

    #[test]
    fn test_accepts_empty_batch() {
        BatchValidator::new(&TreeStore::new())
            .validate(&batch(Vec::new()))
            .expect("empty batch");
    }

    #[test]
    fn test_duplicate_id_in_batch() {
        let kind = rejection(
            &TreeStore::new(),
            vec![import_folder(1, None), import_folder(1, None)],
        );
        assert_eq!(kind, ErrorKind::DuplicateInBatch);
    }

    #[test]
    fn test_existing_file_cannot_be_parent() {
        let kind = rejection(&existing(), vec![import_folder(3, Some(2))]);
        assert_eq!(kind, ErrorKind::FileCannotBeParent);
    }

    #[test]
    fn test_file_in_same_batch_cannot_be_parent() {
        let kind = rejection(
            &TreeStore::new(),
            vec![import_file(1, None, 5), import_folder(2, Some(1))],
        );
        assert_eq!(kind, ErrorKind::FileCannotBeParent);
    }

    #[test]
    fn test_type_change_is_forbidden() {
        let kind = rejection(&existing(), vec![import_file(1, None, 1)]);
        assert_eq!(kind, ErrorKind::TypeChangeForbidden);
        let kind = rejection(&existing(), vec![import_folder(2, None)]);
        assert_eq!(kind, ErrorKind::TypeChangeForbidden);
    }

    #[test]
    fn test_missing_parent_is_impossible_link() {
        let kind = rejection(&existing(), vec![import_file(3, Some(99), 1)]);
        assert_eq!(kind, ErrorKind::ImpossibleParentLink);
    }

    #[test]
    fn test_self_reference_is_impossible_link() {
        let kind = rejection(&TreeStore::new(), vec![import_folder(1, Some(1))]);
        assert_eq!(kind, ErrorKind::ImpossibleParentLink);
    }

    #[test]
    fn test_cycle_through_existing_folders_is_rejected() {
        // 1 ── 3 ── 4; moving 1 under 4 closes the loop.
        let store = TreeStore::from_nodes([folder(1, None), folder(3, Some(1)), folder(4, Some(3))]);
        let kind = rejection(&store, vec![import_folder(1, Some(4))]);
        assert_eq!(kind, ErrorKind::ImpossibleParentLink);
    }

    #[test]
    fn test_cycle_within_batch_is_rejected() {
        let kind = rejection(
            &TreeStore::new(),
            vec![import_folder(1, Some(2)), import_folder(2, Some(1))],
        );
        assert_eq!(kind, ErrorKind::ImpossibleParentLink);
    }

    #[test]
    fn test_swapping_parents_without_cycle_is_accepted() {
        // 1 ── 3, 2 roots; after the batch: 2 ── 1 ── 3.
        let store = TreeStore::from_nodes([folder(1, None), folder(2, None), folder(3, Some(1))]);
        BatchValidator::new(&store)
            .validate(&batch(vec![import_folder(1, Some(2))]))
            .expect("valid move");
    }

    #[test]
    fn test_folder_with_url_or_size_is_invalid() {
        let mut with_url = import_folder(1, None);
        with_url.url = Some("/dir".to_string());
        assert_eq!(rejection(&TreeStore::new(), vec![with_url]), ErrorKind::InvalidShape);

        let mut with_size = import_folder(1, None);
        with_size.size = Some(0);
        assert_eq!(rejection(&TreeStore::new(), vec![with_size]), ErrorKind::InvalidShape);
    }

    #[test]
    fn test_file_shape_rules() {
        let zero = import_file(1, None, 0);
        assert_eq!(rejection(&TreeStore::new(), vec![zero]), ErrorKind::InvalidShape);

        let mut no_url = import_file(1, None, 1);
        no_url.url = None;
        assert_eq!(rejection(&TreeStore::new(), vec![no_url]), ErrorKind::InvalidShape);

        let mut long_url = import_file(1, None, 1);
        long_url.url = Some("x".repeat(MAX_URL_LEN + 1));
        assert_eq!(rejection(&TreeStore::new(), vec![long_url]), ErrorKind::InvalidShape);

        let mut max_url = import_file(1, None, 1);
        max_url.url = Some("x".repeat(MAX_URL_LEN));
        BatchValidator::new(&TreeStore::new())
            .validate(&batch(vec![max_url]))
            .expect("url at the limit");
    }

    #[test]
    fn test_shape_is_checked_before_tree_rules() {
        let kind = rejection(
            &TreeStore::new(),
            vec![import_folder(1, None), import_folder(1, None), import_file(2, None, -1)],
        );
        assert_eq!(kind, ErrorKind::InvalidShape);
    }
}
