//! Ledger Module
//!
//! The host side of the contract boundary. The contract never touches
//! storage directly; it talks to a [`ChaincodeStub`] supplied through the
//! transaction context.
//!
//! ## Responsibilities
//! - Point reads and writes of world state
//! - Open-ended and bounded range scans in key order
//! - Per-key history, oldest version first
//! - Releasing host cursor state when iterators are dropped
//!
//! ## Implementations
//! - [`MemoryLedger`]: in-memory fake for tests and embedding
//! - [`FileLedger`]: journal-backed development peer that survives restarts

mod cursor;
mod state;
mod memory;
mod file;

pub use memory::MemoryLedger;
pub use file::FileLedger;

pub(crate) use cursor::Cursor;
pub(crate) use state::VersionedState;

use crate::error::Result;

/// A world state entry returned by a range scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// One recorded version of a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModification {
    /// Ledger-wide version that produced this modification
    pub version: u64,

    /// Timestamp (unix millis) of the write
    pub timestamp: u64,

    /// True when this modification removed the key
    pub is_delete: bool,

    /// Value written; empty for deletes
    pub value: Vec<u8>,
}

/// Range scan results in key order. Dropping the iterator closes it.
pub type StateQueryIterator<'a> = Box<dyn Iterator<Item = Result<KeyValue>> + 'a>;

/// History of one key, oldest first. Dropping the iterator closes it.
pub type HistoryQueryIterator<'a> = Box<dyn Iterator<Item = Result<KeyModification>> + 'a>;

/// Key-value API the host ledger exposes to the contract
pub trait ChaincodeStub {
    /// Current value of `key`, or `None` if absent
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, recording a new version
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Remove `key` from world state, recording a delete marker
    fn del_state(&self, key: &str) -> Result<()>;

    /// Entries with `start_key <= key < end_key` in key order
    ///
    /// An empty `start_key` or `end_key` leaves that side unbounded, so
    /// `("", "")` scans the whole namespace.
    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> Result<StateQueryIterator<'_>>;

    /// Every recorded modification of `key`, or `None` if it was never written
    fn get_history_for_key(&self, key: &str) -> Result<Option<HistoryQueryIterator<'_>>>;
}
