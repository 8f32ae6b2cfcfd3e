//! Journal-backed ledger
//!
//! A development peer that persists every write to the WAL and rebuilds
//! world state and history from it on startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::wal::{Operation, RecoveryResult, WalRecovery, WalWriter};
use super::{ChaincodeStub, Cursor, HistoryQueryIterator, StateQueryIterator, VersionedState};

/// Ledger whose world state and history live in an append-only journal
///
/// ## Write path
/// 1. Acquire the journal lock (serializes writers)
/// 2. Append the operation to the WAL
/// 3. Apply it to the in-memory state under the entry's LSN
///
/// The journal is never truncated during normal operation: it is the
/// history log, so every version stays replayable.
pub struct FileLedger {
    config: Config,

    /// Path of the journal file inside `data_dir`
    wal_path: PathBuf,

    /// Write-ahead journal (exclusive access needed)
    wal: Mutex<WalWriter>,

    /// World state and history rebuilt from the journal
    state: RwLock<VersionedState>,

    /// Stats from the recovery pass at open
    recovery: RecoveryResult,

    open_iterators: Arc<AtomicUsize>,
}

impl FileLedger {
    const WAL_FILENAME: &'static str = "ledger.wal";

    /// Open or create a ledger with the given config
    ///
    /// On startup:
    /// 1. Validate config and create the data directory
    /// 2. Recover the journal if it exists (truncating torn writes)
    /// 3. Replay every entry into world state and history
    /// 4. Reopen the journal for appending after the last LSN
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.data_dir)?;

        let wal_path = config.data_dir.join(Self::WAL_FILENAME);
        let mut state = VersionedState::default();

        let recovery = if wal_path.exists() {
            let (entries, result) = WalRecovery::recover(&wal_path)?;

            if result.entries_recovered > 0 || result.entries_corrupted > 0 {
                info!(
                    recovered = result.entries_recovered,
                    corrupted = result.entries_corrupted,
                    last_lsn = result.last_lsn,
                    "journal recovery complete"
                );
            }

            for entry in entries {
                state.apply(entry.lsn, entry.timestamp, entry.operation);
            }
            result
        } else {
            RecoveryResult::default()
        };

        let wal = WalWriter::open(&wal_path, config.wal_sync_strategy, recovery.last_lsn)?;
        info!(
            data_dir = %config.data_dir.display(),
            keys = state.len(),
            "ledger opened"
        );

        Ok(Self {
            config,
            wal_path,
            wal: Mutex::new(wal),
            state: RwLock::new(state),
            recovery,
            open_iterators: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(config)
    }

    /// Sync the journal and close the ledger
    pub fn close(self) -> Result<()> {
        let mut wal = self.wal.into_inner();
        wal.sync()
    }

    fn append(&self, operation: Operation) -> Result<()> {
        let mut wal = self.wal.lock();
        let entry = wal.append(operation)?;
        debug!(lsn = entry.lsn, key = entry.operation.key(), "journaled write");

        self.state
            .write()
            .apply(entry.lsn, entry.timestamp, entry.operation);
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of range/history iterators not yet dropped
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    /// Version of the most recent write (0 before any write)
    pub fn current_version(&self) -> u64 {
        self.state.read().last_version()
    }

    /// Stats from the recovery pass run at open
    pub fn recovery_result(&self) -> &RecoveryResult {
        &self.recovery
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the journal file path
    pub fn wal_path(&self) -> &Path {
        &self.wal_path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl ChaincodeStub for FileLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.state.read().get(key))
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.append(Operation::Put {
            key: key.to_string(),
            value,
        })
    }

    fn del_state(&self, key: &str) -> Result<()> {
        if !self.state.read().contains(key) {
            return Ok(());
        }
        self.append(Operation::Delete {
            key: key.to_string(),
        })
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
