//! Versioned world state shared by the ledger implementations.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use crate::wal::Operation;
use super::{KeyModification, KeyValue};

/// World state plus the append-only history of every key
#[derive(Debug, Default)]
pub(crate) struct VersionedState {
    /// Current values, ordered by key for range scans
    world: BTreeMap<String, Vec<u8>>,

    /// Every modification per key, oldest first
    history: HashMap<String, Vec<KeyModification>>,

    /// Highest version applied so far
    last_version: u64,
}

impl VersionedState {
    pub(crate) fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.world.get(key).cloned()
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.world.contains_key(key)
    }

    pub(crate) fn last_version(&self) -> u64 {
        self.last_version
    }

    pub(crate) fn len(&self) -> usize {
        self.world.len()
    }

    /// Apply one operation as `version`
    pub(crate) fn apply(&mut self, version: u64, timestamp: u64, operation: Operation) {
        let (key, modification) = match operation {
            Operation::Put { key, value } => {
                self.world.insert(key.clone(), value.clone());
                let modification = KeyModification {
                    version,
                    timestamp,
                    is_delete: false,
                    value,
                };
                (key, modification)
            }
            Operation::Delete { key } => {
                self.world.remove(&key);
                let modification = KeyModification {
                    version,
                    timestamp,
                    is_delete: true,
                    value: Vec::new(),
                };
                (key, modification)
            }
        };

        self.history.entry(key).or_default().push(modification);
        self.last_version = self.last_version.max(version);
    }

    /// Snapshot of `start_key <= key < end_key`, empty bounds open
    pub(crate) fn range(&self, start_key: &str, end_key: &str) -> Vec<KeyValue> {
        if !start_key.is_empty() && !end_key.is_empty() && start_key >= end_key {
            return Vec::new();
        }

        let lower = if start_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start_key)
        };
        let upper = if end_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end_key)
        };

        self.world
            .range::<str, _>((lower, upper))
            .map(|(key, value)| KeyValue {
                key: key.clone(),
                value: value.clone(),
            })
            .collect()
    }

    pub(crate) fn history(&self, key: &str) -> Option<Vec<KeyModification>> {
        self.history.get(key).cloned()
    }
}
