//! Keyed timer collections
//!
//! [`TimerStore`] is the persistence seam: the service only needs insert,
//! remove, an insertion-ordered listing, and a bulk predicate removal.
//! [`MemoryStore`] is the stock implementation; anything honoring the same
//! contract (an embedded database, a transactional file) can replace it.

use crate::error::TimerError;
use crate::record::{TimerId, TimerRecord};

/// Keyed collection of pending timer records.
///
/// Callers (the service) serialize all mutations behind a single lock, so
/// implementations do not need internal synchronization. `list_all` and
/// `remove_where` observe and preserve insertion order.
pub trait TimerStore: Send {
    /// Insert a new record. Fails with `TimerError::IdConflict` if a record
    /// with the same id is already present.
    fn insert(&mut self, record: TimerRecord) -> Result<(), TimerError>;

    /// Remove the record with the given id, reporting whether one existed.
    fn remove(&mut self, id: &TimerId) -> bool;

    /// Snapshot of all pending records, in insertion order.
    fn list_all(&self) -> Vec<TimerRecord>;

    /// Remove and return every record matching the predicate, in insertion
    /// order. No matching record may be left behind.
    fn remove_where(
        &mut self,
        predicate: &mut dyn FnMut(&TimerRecord) -> bool,
    ) -> Vec<TimerRecord>;
}

/// In-memory, insertion-ordered store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<TimerRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimerStore for MemoryStore {
    fn insert(&mut self, record: TimerRecord) -> Result<(), TimerError> {
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(TimerError::IdConflict { id: record.id });
        }
        self.records.push(record);
        Ok(())
    }

    fn remove(&mut self, id: &TimerId) -> bool {
        match self.records.iter().position(|r| &r.id == id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    fn list_all(&self) -> Vec<TimerRecord> {
        self.records.clone()
    }

    fn remove_where(
        &mut self,
        predicate: &mut dyn FnMut(&TimerRecord) -> bool,
    ) -> Vec<TimerRecord> {
        let (removed, kept) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|r| predicate(r));
        self.records = kept;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TimerAction;

    fn record(id: &str) -> TimerRecord {
        TimerRecord {
            id: TimerId::from(id),
            action: TimerAction::Lock,
            target_time: "2030-01-01T00:00:00Z".parse().unwrap(),
            message: None,
            created_at: "2029-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut store = MemoryStore::new();
        store.insert(record("a")).unwrap();

        let err = store.insert(record("a")).unwrap_err();
        assert!(matches!(err, TimerError::IdConflict { id } if id.as_str() == "a"));
    }

    #[test]
    fn remove_reports_presence() {
        let mut store = MemoryStore::new();
        store.insert(record("a")).unwrap();

        assert!(store.remove(&TimerId::from("a")));
        assert!(!store.remove(&TimerId::from("a")));
        assert!(!store.remove(&TimerId::from("b")));
    }

    #[test]
    fn list_all_preserves_insertion_order() {
        let mut store = MemoryStore::new();
        for id in ["a", "b", "c"] {
            store.insert(record(id)).unwrap();
        }
        store.remove(&TimerId::from("b"));
        store.insert(record("d")).unwrap();

        let snapshot = store.list_all();
        let ids: Vec<&str> = snapshot.iter().map(|r| r.id.as_str()).collect();
        // Snapshot is a clone; the store is untouched.
        assert_eq!(ids, ["a", "c", "d"]);
        assert_eq!(store.list_all().len(), 3);
    }

    #[test]
    fn remove_where_takes_exactly_the_matching_records() {
        let mut store = MemoryStore::new();
        for id in ["a", "b", "c", "d"] {
            store.insert(record(id)).unwrap();
        }

        let removed = store.remove_where(&mut |r| r.id.as_str() != "b" && r.id.as_str() != "d");
        let removed_ids: Vec<&str> = removed.iter().map(|r| r.id.as_str()).collect();
        let kept = store.list_all();
        let kept_ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(removed_ids, ["a", "c"]);
        assert_eq!(kept_ids, ["b", "d"]);
    }
}
