//! History retrieval

use containerledger::contract::{Container, ContainerContract};
use containerledger::ledger::MemoryLedger;

use crate::common::{contract, ctx};

#[test]
fn test_history_in_write_order() {
    let ledger = MemoryLedger::new();
    let contract = contract();

    for cid in ["cid1", "cid2", "cid3"] {
        contract.create_or_update_container(&ctx(&ledger), "u1", cid).unwrap();
    }

    let history = contract.read_container_history(&ctx(&ledger), "u1").unwrap();

    let cids: Vec<_> = history.iter().map(|c| c.cid.as_str()).collect();
    assert_eq!(cids, vec!["cid1", "cid2", "cid3"]);
    assert!(history.iter().all(|c| c.uid == "u1"));
    assert_eq!(ledger.open_iterators(), 0);
}

#[test]
fn test_history_survives_delete() {
    let ledger = MemoryLedger::new();
    let contract = contract();

    contract
        .create_or_update_container(&ctx(&ledger), "patient-1", "cid-abc")
        .unwrap();
    contract.delete_container(&ctx(&ledger), "patient-1").unwrap();

    let history = contract
        .read_container_history(&ctx(&ledger), "patient-1")
        .unwrap();

    assert_eq!(history, vec![Container::new("patient-1", "cid-abc")]);
}

#[test]
fn test_history_spans_delete_and_recreate() {
    let ledger = MemoryLedger::new();
    let contract = contract();

    contract.create_or_update_container(&ctx(&ledger), "u1", "before").unwrap();
    contract.delete_container(&ctx(&ledger), "u1").unwrap();
    contract.create_or_update_container(&ctx(&ledger), "u1", "after").unwrap();

    let history = contract.read_container_history(&ctx(&ledger), "u1").unwrap();
    let cids: Vec<_> = history.iter().map(|c| c.cid.as_str()).collect();
    assert_eq!(cids, vec!["before", "after"]);
}

#[test]
fn test_history_of_unknown_key_is_not_found() {
    let ledger = MemoryLedger::new();

    let err = contract()
        .read_container_history(&ctx(&ledger), "ghost")
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn test_identical_upserts_each_record_a_version() {
    let ledger = MemoryLedger::new();
    let contract = contract();

    contract.create_or_update_container(&ctx(&ledger), "u1", "same").unwrap();
    contract.create_or_update_container(&ctx(&ledger), "u1", "same").unwrap();

    let history = contract.read_container_history(&ctx(&ledger), "u1").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], history[1]);
}

#[test]
fn test_all_histories_follow_key_order() {
    let ledger = MemoryLedger::new();
    let contract = contract();

    contract.create_or_update_container(&ctx(&ledger), "b", "b1").unwrap();
    contract.create_or_update_container(&ctx(&ledger), "a", "a1").unwrap();
    contract.create_or_update_container(&ctx(&ledger), "b", "b2").unwrap();
    contract.create_or_update_container(&ctx(&ledger), "a", "a2").unwrap();
    contract.create_or_update_container(&ctx(&ledger), "a", "a3").unwrap();

    let histories = contract.get_all_containers_history(&ctx(&ledger)).unwrap();

    let cids: Vec<Vec<&str>> = histories
        .iter()
        .map(|h| h.iter().map(|c| c.cid.as_str()).collect())
        .collect();
    assert_eq!(cids, vec![vec!["a1", "a2", "a3"], vec!["b1", "b2"]]);
    assert_eq!(ledger.open_iterators(), 0);
}

#[test]
fn test_all_histories_omit_deleted_keys() {
    let ledger = MemoryLedger::new();
    let contract = contract();

    contract.create_or_update_container(&ctx(&ledger), "gone", "x").unwrap();
    contract.create_or_update_container(&ctx(&ledger), "kept", "y").unwrap();
    contract.delete_container(&ctx(&ledger), "gone").unwrap();

    let histories = contract.get_all_containers_history(&ctx(&ledger)).unwrap();

    assert_eq!(histories, vec![vec![Container::new("kept", "y")]]);
}
