use super::types::RecordId;

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-lifetime map of identifier -> digest. An empty digest marks a pending job.
///
/// Entries are only ever written by the submission that created them and by the one
/// deferred task computing their digest, so per-key writes never race. The map itself
/// is a `DashMap` so lookups and stats can read while other keys are being written.
pub struct JobTable {
    entries: DashMap<RecordId, String>,
    /// Highest identifier handed out so far, starting from the persisted record count.
    last_id: AtomicU64,
}

impl JobTable {
    pub fn new(saved_records: u64) -> Self {
        Self {
            entries: DashMap::new(),
            last_id: AtomicU64::new(saved_records),
        }
    }

    /// Allocates the next identifier and inserts it as pending.
    ///
    /// The increment and read happen in one atomic step, so concurrent submissions
    /// never share an id.
    pub fn insert_pending(&self) -> RecordId {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.entries.insert(id, String::new());
        id
    }

    /// Publishes the digest for a pending entry. Completed entries are left untouched.
    pub fn complete(&self, id: RecordId, digest: String) -> bool {
        match self.entries.get_mut(&id) {
            Some(mut entry) if entry.is_empty() => {
                *entry = digest;
                true
            }
            Some(_) => false,
            None => {
                tracing::warn!("Completed job {} has no table entry", id);
                false
            }
        }
    }

    pub fn get(&self, id: RecordId) -> Option<String> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().is_empty())
            .count()
    }

    /// Copies every entry, ordered by identifier. The table itself is left intact.
    pub fn snapshot(&self) -> Vec<(RecordId, String)> {
        let mut entries: Vec<(RecordId, String)> = self
            .entries
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }
}
