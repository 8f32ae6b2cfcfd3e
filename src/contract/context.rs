//! Transaction context handed to every contract entry point.

use crate::ledger::ChaincodeStub;

/// Per-invocation handle to the host ledger
pub struct TxContext<'a> {
    stub: &'a dyn ChaincodeStub,
    tx_id: String,
}

impl<'a> TxContext<'a> {
    pub fn new(stub: &'a dyn ChaincodeStub, tx_id: impl Into<String>) -> Self {
        Self {
            stub,
            tx_id: tx_id.into(),
        }
    }

    /// The host's key-value API for this transaction
    pub fn stub(&self) -> &'a dyn ChaincodeStub {
        self.stub
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }
}
