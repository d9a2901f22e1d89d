//! Pending-deletion bookkeeping for remote keys.

use std::collections::BTreeMap;

/// The set of remote keys seen by the lister, each carrying a
/// pending-deletion flag. Keys start pending and are cleared as local
/// files claim them; whatever is still pending at the end of the run is
/// stale and gets deleted.
#[derive(Clone, Debug, Default)]
pub struct RemoteKeySet {
    entries: BTreeMap<String, bool>,
}

impl RemoteKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a remote key as pending deletion.
    pub fn insert(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), true);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Clears the pending flag for `key`, inserting it as kept if the
    /// lister never saw it.
    pub fn mark_kept(&mut self, key: &str) {
        self.entries.insert(key.to_string(), false);
    }

    /// Clears the pending flag for every key under `prefix` and returns
    /// the keys that were still pending, in sorted order.
    pub fn exempt_prefix(&mut self, prefix: &str) -> Vec<String> {
        let mut exempted = Vec::new();
        for (key, pending) in self.entries.range_mut(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            if *pending {
                *pending = false;
                exempted.push(key.clone());
            }
        }
        exempted
    }

    /// Keys still flagged for deletion, in sorted order.
    pub fn deletion_candidates(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, pending)| **pending)
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
