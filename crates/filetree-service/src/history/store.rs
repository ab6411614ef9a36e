//! Append-only store of node snapshots.

use std::collections::HashMap;

use filetree_core::types::{NodeId, Timestamp};
use filetree_entity::history::HistoryRecord;

/// Snapshots per node, each list kept ascending by date. Records sharing a
/// date keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: HashMap<NodeId, Vec<HistoryRecord>>,
}

impl HistoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously persisted records.
    pub fn from_records(records: impl IntoIterator<Item = HistoryRecord>) -> Self {
        let mut store = Self::new();
        store.extend(records);
        store
    }

    /// Append one snapshot.
    pub fn append(&mut self, record: HistoryRecord) {
        let list = self.records.entry(record.id).or_default();
        let pos = list.partition_point(|r| r.date <= record.date);
        list.insert(pos, record);
    }

    /// Append many snapshots.
    pub fn extend(&mut self, records: impl IntoIterator<Item = HistoryRecord>) {
        for record in records {
            self.append(record);
        }
    }

    /// All snapshots of `id`, ascending by date. Call again to restart.
    pub fn by_id(&self, id: NodeId) -> std::slice::Iter<'_, HistoryRecord> {
        self.slice(id).iter()
    }

    /// Snapshots of `id` with `start <= date < end`. A missing bound is
    /// unbounded on that side.
    pub fn by_id_and_range(
        &self,
        id: NodeId,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> std::slice::Iter<'_, HistoryRecord> {
        let list = self.slice(id);
        let lo = start.map_or(0, |s| list.partition_point(|r| r.date < s));
        let hi = end.map_or(list.len(), |e| list.partition_point(|r| r.date < e));
        list[lo..hi.max(lo)].iter()
    }

    /// Drop every snapshot of `id`. Returns how many were removed.
    pub fn delete_all_for(&mut self, id: NodeId) -> usize {
        self.records.remove(&id).map_or(0, |list| list.len())
    }

    fn slice(&self, id: NodeId) -> &[HistoryRecord] {
        self.records.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}
