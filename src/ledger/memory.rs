//! In-memory ledger
//!
//! BTreeMap-backed world state with history, guarded by a RwLock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::wal::{entry_clock, Operation};
use super::{ChaincodeStub, Cursor, HistoryQueryIterator, StateQueryIterator, VersionedState};

/// In-memory ledger for tests and embedding
///
/// Writes are visible immediately; each put or delete gets the next
/// ledger-wide version. Nothing survives the process.
#[derive(Default)]
pub struct MemoryLedger {
    state: RwLock<VersionedState>,
    open_iterators: Arc<AtomicUsize>,
}

impl MemoryLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of range/history iterators not yet dropped
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    /// Version of the most recent write (0 before any write)
    pub fn current_version(&self) -> u64 {
        self.state.read().last_version()
    }

    /// Number of live keys in world state
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn apply(&self, operation: Operation) {
        let mut state = self.state.write();
        let version = state.last_version() + 1;
        state.apply(version, entry_clock(), operation);
    }
}

impl ChaincodeStub for MemoryLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.state.read().get(key))
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.apply(Operation::Put {
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    fn del_state(&self, key: &str) -> Result<()> {
        if !self.state.read().contains(key) {
            return Ok(());
        }
        self.apply(Operation::Delete {
            key: key.to_string(),
        });
        Ok(())
    }

    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> Result<StateQueryIterator<'_>> {
        let snapshot = self.state.read().range(start_key, end_key);
        Ok(Box::new(Cursor::new(snapshot, &self.open_iterators)))
    }

    fn get_history_for_key(&self, key: &str) -> Result<Option<HistoryQueryIterator<'_>>> {
        let history = self.state.read().history(key);
        Ok(history.map(|modifications| {
            Box::new(Cursor::new(modifications, &self.open_iterators)) as HistoryQueryIterator<'_>
        }))
    }
}
