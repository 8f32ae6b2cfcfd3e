//! WAL Writer
//!
//! Handles appending entries to the WAL file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::error;

use crate::config::WalSyncStrategy;
use crate::error::Result;
use super::{Operation, WalEntry};

/// File operations the writer needs beyond `Write`
pub trait JournalFile: Write {
    /// Flush file data to stable storage
    fn sync_data(&self) -> io::Result<()>;

    /// Cut the file back to `len` bytes
    fn truncate(&self, len: u64) -> io::Result<()>;
}

impl JournalFile for File {
    fn sync_data(&self) -> io::Result<()> {
        File::sync_data(self)
    }

    fn truncate(&self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Writes entries to the WAL file
///
/// An append either lands completely (written, and synced when the
/// strategy asks for it) or the file is cut back to where it was and the
/// LSN does not advance.
pub struct WalWriter<F: JournalFile = File> {
    path: PathBuf,
    file: F,
    /// File length after the last committed entry
    committed_len: u64,
    /// LSN of the last appended entry (0 when empty)
    current_lsn: u64,
    sync_strategy: WalSyncStrategy,
    /// Entries written since the last fsync
    unsynced: usize,
}

impl WalWriter<File> {
    /// Open or create a WAL file, continuing after `last_lsn`
    ///
    /// `last_lsn` comes from recovery; pass 0 for a fresh journal.
    pub fn open(path: &Path, sync_strategy: WalSyncStrategy, last_lsn: u64) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let len = file.metadata()?.len();
        Ok(Self::from_file(path, file, len, sync_strategy, last_lsn))
    }
}

impl<F: JournalFile> WalWriter<F> {
    /// Wrap an already-open journal of `len` bytes
    pub fn from_file(
        path: &Path,
        file: F,
        len: u64,
        sync_strategy: WalSyncStrategy,
        last_lsn: u64,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            file,
            committed_len: len,
            current_lsn: last_lsn,
            sync_strategy,
            unsynced: 0,
        }
    }

    /// Append an operation to the WAL, returning the written entry
    ///
    /// The frame is handed to the OS before returning; fsync follows the
    /// configured sync strategy. On any failure the partial frame is
    /// truncated away and the error returned.
    pub fn append(&mut self, operation: Operation) -> Result<WalEntry> {
        let entry = WalEntry::new(self.current_lsn + 1, operation);
        let frame = entry.encode()?;

        if let Err(e) = self.write_frame(&frame) {
            self.rollback();
            return Err(e.into());
        }

        self.unsynced += 1;
        let should_sync = match self.sync_strategy {
            WalSyncStrategy::EveryWrite => true,
            WalSyncStrategy::EveryNEntries { count } => self.unsynced >= count,
        };
        if should_sync {
            if let Err(e) = self.file.sync_data() {
                self.unsynced -= 1;
                self.rollback();
                return Err(e.into());
            }
            self.unsynced = 0;
        }

        self.committed_len += frame.len() as u64;
        self.current_lsn = entry.lsn;
        Ok(entry)
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.file.write_all(frame)?;
        self.file.flush()
    }

    fn rollback(&mut self) {
        if let Err(e) = self.file.truncate(self.committed_len) {
            error!(
                path = %self.path.display(),
                offset = self.committed_len,
                error = %e,
                "failed to truncate journal after a failed append"
            );
        }
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.flush()?;
        self.file.sync_data()?;
        self.unsynced = 0;
        Ok(())
    }

    /// Get the current LSN
    pub fn current_lsn(&self) -> u64 {
        self.current_lsn
    }

    /// Number of entries appended since the last fsync
    pub fn unsynced_entries(&self) -> usize {
        self.unsynced
    }

    /// Length of the journal up to the last committed entry
    pub fn committed_len(&self) -> u64 {
        self.committed_len
    }

    /// Path of the journal file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
