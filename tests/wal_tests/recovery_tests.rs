//! WalRecovery tests

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};

use containerledger::wal::{RecoveryResult, WalRecovery, HEADER_SIZE};
use tempfile::TempDir;

use crate::common::{file_len, write_entries};

#[test]
fn test_clean_journal_recovers_everything() {
    let temp = TempDir::new().unwrap();
    let path = write_entries(&temp, 4);
    let len = file_len(&path);

    let (entries, result) = WalRecovery::recover(&path).unwrap();

    assert_eq!(entries.len(), 4);
    assert_eq!(
        result,
        RecoveryResult {
            entries_recovered: 4,
            entries_corrupted: 0,
            last_lsn: 4,
            was_truncated: false,
        }
    );
    assert_eq!(file_len(&path), len);
}

#[test]
fn test_empty_journal() {
    let temp = TempDir::new().unwrap();
    let path = write_entries(&temp, 0);

    let (entries, result) = WalRecovery::recover(&path).unwrap();

    assert!(entries.is_empty());
    assert_eq!(result, RecoveryResult::default());
}

#[test]
fn test_torn_write_truncated() {
    let temp = TempDir::new().unwrap();
    let path = write_entries(&temp, 2);
    let good_len = file_len(&path);
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(&[9u8; HEADER_SIZE + 2]).unwrap();
    drop(file);

    let (entries, result) = WalRecovery::recover(&path).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(result.entries_corrupted, 1);
    assert_eq!(result.last_lsn, 2);
    assert!(result.was_truncated);
    assert_eq!(file_len(&path), good_len);
}

#[test]
fn test_corrupt_middle_entry_stops_replay() {
    let temp = TempDir::new().unwrap();
    let path = write_entries(&temp, 3);
    let total = file_len(&path);
    let entry_len = total / 3;

    // Flip a data byte inside the second entry.
    let mut file = OpenOptions::new().read(true).write(true).open(&path).unwrap();
    file.seek(SeekFrom::Start(entry_len + HEADER_SIZE as u64 + 1)).unwrap();
    file.write_all(&[0xFF]).unwrap();
    drop(file);

    let (entries, result) = WalRecovery::recover(&path).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(result.entries_recovered, 1);
    assert_eq!(result.entries_corrupted, 1);
    assert_eq!(file_len(&path), entry_len);
}

#[test]
fn test_verify_does_not_modify() {
    let temp = TempDir::new().unwrap();
    let path = write_entries(&temp, 2);
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(b"torn").unwrap();
    drop(file);
    let len = file_len(&path);

    let result = WalRecovery::verify(&path).unwrap();

    assert_eq!(result.entries_recovered, 2);
    assert_eq!(result.entries_corrupted, 1);
    assert!(!result.was_truncated);
    assert_eq!(file_len(&path), len);
}
