//! Shared helpers for WAL tests

use std::path::{Path, PathBuf};

use containerledger::config::WalSyncStrategy;
use containerledger::wal::{Operation, WalWriter};
use tempfile::TempDir;

pub fn wal_path(dir: &TempDir) -> PathBuf {
    dir.path().join("test.wal")
}

pub fn put(key: &str, value: &[u8]) -> Operation {
    Operation::Put {
        key: key.to_string(),
        value: value.to_vec(),
    }
}

/// Write `count` puts (`key-N` => `value-N`) and return the journal path
pub fn write_entries(dir: &TempDir, count: usize) -> PathBuf {
    let path = wal_path(dir);
    let mut writer = WalWriter::open(&path, WalSyncStrategy::EveryWrite, 0).unwrap();
    for i in 0..count {
        writer
            .append(put(&format!("key-{}", i), format!("value-{}", i).as_bytes()))
            .unwrap();
    }
    writer.sync().unwrap();
    path
}

pub fn file_len(path: &Path) -> u64 {
    std::fs::metadata(path).unwrap().len()
}
