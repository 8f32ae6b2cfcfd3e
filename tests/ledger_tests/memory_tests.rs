//! MemoryLedger tests

use containerledger::ledger::{ChaincodeStub, MemoryLedger};

fn keys(ledger: &MemoryLedger, start: &str, end: &str) -> Vec<String> {
    ledger
        .get_state_by_range(start, end)
        .unwrap()
        .map(|kv| kv.unwrap().key)
        .collect()
}

fn seeded() -> MemoryLedger {
    let ledger = MemoryLedger::new();
    for key in ["delta", "alpha", "charlie", "bravo"] {
        ledger.put_state(key, key.as_bytes().to_vec()).unwrap();
    }
    ledger
}

// =============================================================================
// Point Operations
// =============================================================================

#[test]
fn test_new_ledger_is_empty() {
    let ledger = MemoryLedger::new();
    assert!(ledger.is_empty());
    assert_eq!(ledger.current_version(), 0);
    assert_eq!(ledger.open_iterators(), 0);
}

#[test]
fn test_put_get_delete() {
    let ledger = MemoryLedger::new();

    ledger.put_state("k", b"v".to_vec()).unwrap();
    assert_eq!(ledger.get_state("k").unwrap(), Some(b"v".to_vec()));

    ledger.del_state("k").unwrap();
    assert_eq!(ledger.get_state("k").unwrap(), None);
}

#[test]
fn test_every_write_bumps_version() {
    let ledger = MemoryLedger::new();

    ledger.put_state("a", b"1".to_vec()).unwrap();
    ledger.put_state("a", b"1".to_vec()).unwrap();
    ledger.del_state("a").unwrap();

    assert_eq!(ledger.current_version(), 3);
}

#[test]
fn test_delete_of_absent_key_records_nothing() {
    let ledger = MemoryLedger::new();

    ledger.del_state("ghost").unwrap();

    assert_eq!(ledger.current_version(), 0);
    assert!(ledger.get_history_for_key("ghost").unwrap().is_none());
}

// =============================================================================
// Range Scans
// =============================================================================

#[test]
fn test_open_range_returns_all_keys_sorted() {
    let ledger = seeded();
    assert_eq!(keys(&ledger, "", ""), vec!["alpha", "bravo", "charlie", "delta"]);
}

#[test]
fn test_range_end_is_exclusive() {
    let ledger = seeded();
    assert_eq!(keys(&ledger, "bravo", "delta"), vec!["bravo", "charlie"]);
}

#[test]
fn test_half_open_ranges() {
    let ledger = seeded();
    assert_eq!(keys(&ledger, "charlie", ""), vec!["charlie", "delta"]);
    assert_eq!(keys(&ledger, "", "bravo"), vec!["alpha"]);
}

#[test]
fn test_inverted_range_is_empty() {
    let ledger = seeded();
    assert!(keys(&ledger, "delta", "alpha").is_empty());
    assert!(keys(&ledger, "bravo", "bravo").is_empty());
}

#[test]
fn test_range_is_a_snapshot() {
    let ledger = seeded();
    let iter = ledger.get_state_by_range("", "").unwrap();

    ledger.put_state("echo", b"e".to_vec()).unwrap();

    assert_eq!(iter.count(), 4);
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_history_records_puts_and_deletes_in_order() {
    let ledger = MemoryLedger::new();
    ledger.put_state("k", b"1".to_vec()).unwrap();
    ledger.put_state("other", b"x".to_vec()).unwrap();
    ledger.put_state("k", b"2".to_vec()).unwrap();
    ledger.del_state("k").unwrap();

    let history: Vec<_> = ledger
        .get_history_for_key("k")
        .unwrap()
        .unwrap()
        .map(|m| m.unwrap())
        .collect();

    assert_eq!(history.len(), 3);
    assert_eq!(history[0].value, b"1");
    assert_eq!(history[1].value, b"2");
    assert!(history[2].is_delete);
    assert!(history[2].value.is_empty());

    let versions: Vec<_> = history.iter().map(|m| m.version).collect();
    assert_eq!(versions, vec![1, 3, 4]);
}

#[test]
fn test_history_of_unwritten_key_is_none() {
    let ledger = MemoryLedger::new();
    assert!(ledger.get_history_for_key("nope").unwrap().is_none());
}

// =============================================================================
// Cursor Accounting
// =============================================================================

#[test]
fn test_iterators_counted_until_dropped() {
    let ledger = seeded();

    let range = ledger.get_state_by_range("", "").unwrap();
    let history = ledger.get_history_for_key("alpha").unwrap().unwrap();
    assert_eq!(ledger.open_iterators(), 2);

    drop(range);
    assert_eq!(ledger.open_iterators(), 1);
    drop(history);
    assert_eq!(ledger.open_iterators(), 0);
}

#[test]
fn test_partially_consumed_iterator_released_on_drop() {
    let ledger = seeded();

    {
        let mut range = ledger.get_state_by_range("", "").unwrap();
        assert!(range.next().is_some());
    }

    assert_eq!(ledger.open_iterators(), 0);
}
