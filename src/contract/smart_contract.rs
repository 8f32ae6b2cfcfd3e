//! Container contract operations
//!
//! Every operation is a thin pass-through to the host stub. Failures are
//! returned as soon as they happen; nothing is retried.

use tracing::{debug, warn};

use crate::error::{LedgerError, Result};
use crate::ledger::HistoryQueryIterator;
use super::{Container, TxContext};

/// Operations the host can invoke on the container contract
pub trait ContainerContract {
    /// Instantiation hook, called once when the contract is deployed
    fn init(&self, ctx: &TxContext<'_>) -> Result<()>;

    /// Store a container under `uid`, replacing any previous value
    fn create_or_update_container(&self, ctx: &TxContext<'_>, uid: &str, cid: &str) -> Result<()>;

    /// Current container stored under `uid`
    fn read_container(&self, ctx: &TxContext<'_>, uid: &str) -> Result<Container>;

    /// Remove the container stored under `uid`
    fn delete_container(&self, ctx: &TxContext<'_>, uid: &str) -> Result<()>;

    /// Whether a container is stored under `uid`
    fn container_exists(&self, ctx: &TxContext<'_>, uid: &str) -> Result<bool>;

    /// Every version ever written under `uid`, oldest first
    fn read_container_history(&self, ctx: &TxContext<'_>, uid: &str) -> Result<Vec<Container>>;

    /// All live containers in key order
    fn get_all_containers(&self, ctx: &TxContext<'_>) -> Result<Vec<Container>>;

    /// Full history of every live container, in key order
    fn get_all_containers_history(&self, ctx: &TxContext<'_>) -> Result<Vec<Vec<Container>>>;
}

/// The container asset contract
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartContract;

impl SmartContract {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerContract for SmartContract {
    fn init(&self, ctx: &TxContext<'_>) -> Result<()> {
        debug!(tx_id = ctx.tx_id(), "contract initialized");
        Ok(())
    }

    fn create_or_update_container(&self, ctx: &TxContext<'_>, uid: &str, cid: &str) -> Result<()> {
        let container = Container::new(uid, cid);
        debug!(tx_id = ctx.tx_id(), uid, "writing container");
        ctx.stub().put_state(uid, container.to_canonical_bytes())
    }

    fn read_container(&self, ctx: &TxContext<'_>, uid: &str) -> Result<Container> {
        let bytes = match ctx.stub().get_state(uid)? {
            Some(bytes) => bytes,
            None => {
                warn!(tx_id = ctx.tx_id(), uid, "read of missing container");
                return Err(LedgerError::NotFound(uid.to_string()));
            }
        };
        Container::from_bytes(uid, &bytes)
    }

    fn delete_container(&self, ctx: &TxContext<'_>, uid: &str) -> Result<()> {
        if !self.container_exists(ctx, uid)? {
            warn!(tx_id = ctx.tx_id(), uid, "delete of missing container");
            return Err(LedgerError::NotFound(uid.to_string()));
        }
        debug!(tx_id = ctx.tx_id(), uid, "deleting container");
        ctx.stub().del_state(uid)
    }

    fn container_exists(&self, ctx: &TxContext<'_>, uid: &str) -> Result<bool> {
        Ok(ctx.stub().get_state(uid)?.is_some())
    }

    fn read_container_history(&self, ctx: &TxContext<'_>, uid: &str) -> Result<Vec<Container>> {
        let history = ctx
            .stub()
            .get_history_for_key(uid)?
            .ok_or_else(|| LedgerError::NotFound(uid.to_string()))?;
        decode_history(uid, history)
    }

    fn get_all_containers(&self, ctx: &TxContext<'_>) -> Result<Vec<Container>> {
        let results = ctx.stub().get_state_by_range("", "")?;

        let mut containers = Vec::new();
        for kv in results {
            let kv = kv?;
            containers.push(Container::from_bytes(&kv.key, &kv.value)?);
        }
        debug!(tx_id = ctx.tx_id(), count = containers.len(), "listed containers");
        Ok(containers)
    }

    fn get_all_containers_history(&self, ctx: &TxContext<'_>) -> Result<Vec<Vec<Container>>> {
        let results = ctx.stub().get_state_by_range("", "")?;

        let mut histories = Vec::new();
        for kv in results {
            let kv = kv?;
            let container = Container::from_bytes(&kv.key, &kv.value)?;

            // History is looked up by the stored UID, not the range key.
            let history = ctx
                .stub()
                .get_history_for_key(&container.uid)?
                .ok_or_else(|| LedgerError::NotFound(container.uid.clone()))?;
            histories.push(decode_history(&container.uid, history)?);
        }
        debug!(tx_id = ctx.tx_id(), count = histories.len(), "listed container histories");
        Ok(histories)
    }
}

/// Decode every non-delete modification, consuming (and closing) the iterator
fn decode_history(uid: &str, history: HistoryQueryIterator<'_>) -> Result<Vec<Container>> {
    let mut versions = Vec::new();
    for modification in history {
        let modification = modification?;
        if modification.is_delete {
            continue;
        }
        versions.push(Container::from_bytes(uid, &modification.value)?);
    }
    Ok(versions)
}
