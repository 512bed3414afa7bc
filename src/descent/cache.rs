//! Ordered cache of improving moves.

use std::collections::{BTreeSet, HashMap};

use super::record::CachedMove;
use crate::model::{Instance, Tour};
use crate::moves::{Move, MoveKey};

/// Improving moves ordered by `(delta, key)`, at most one per key.
///
/// Records set aside with [`park`](Self::park) are held outside the ordered
/// set until [`restore_parked`](Self::restore_parked) is called.
#[derive(Debug, Clone, Default)]
pub struct MoveCache {
    order: BTreeSet<(i64, MoveKey)>,
    records: HashMap<MoveKey, CachedMove>,
    parked: Vec<CachedMove>,
}

impl MoveCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ordered records, parked records excluded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no ordered record remains.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of parked records.
    pub fn parked_len(&self) -> usize {
        self.parked.len()
    }

    /// Record stored under `key`.
    pub fn get(&self, key: &MoveKey) -> Option<&CachedMove> {
        self.records.get(key)
    }

    /// Delta of the best record.
    pub fn best_delta(&self) -> Option<i64> {
        self.order.first().map(|&(delta, _)| delta)
    }

    /// Inserts `record`, replacing any record with the same key.
    ///
    /// A non-improving record evicts the existing one instead. Returns
    /// whether the record was stored.
    pub fn offer(&mut self, record: CachedMove) -> bool {
        self.remove(&record.key);
        if record.delta >= 0 {
            return false;
        }
        self.order.insert((record.delta, record.key));
        self.records.insert(record.key, record);
        true
    }

    /// Captures `mv` on `tour` and offers it. Inapplicable moves are
    /// ignored.
    pub fn offer_move(&mut self, mv: Move, tour: &Tour, instance: &Instance) -> bool {
        match CachedMove::capture(mv, tour, instance) {
            Some(record) => self.offer(record),
            None => false,
        }
    }

    /// Removes the record stored under `key`.
    pub fn remove(&mut self, key: &MoveKey) -> Option<CachedMove> {
        let record = self.records.remove(key)?;
        self.order.remove(&(record.delta, record.key));
        Some(record)
    }

    /// Removes and returns the best record.
    pub fn pop_best(&mut self) -> Option<CachedMove> {
        let (_, key) = self.order.pop_first()?;
        self.records.remove(&key)
    }

    /// Sets a record aside.
    pub fn park(&mut self, record: CachedMove) {
        self.parked.push(record);
    }

    /// Returns parked records to the ordered set.
    ///
    /// A parked record whose key was re-offered in the meantime is dropped
    /// in favor of the newer record.
    pub fn restore_parked(&mut self) {
        for record in std::mem::take(&mut self.parked) {
            if !self.records.contains_key(&record.key) {
                self.offer(record);
            }
        }
    }

    /// Drops every record, parked ones included.
    pub fn clear(&mut self) {
        self.order.clear();
        self.records.clear();
        self.parked.clear();
    }
}
