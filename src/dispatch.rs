//! Dispatch Module
//!
//! Routes host invocations to the contract.
//!
//! ## Responsibilities
//! - Assign each invocation a transaction id and context
//! - Call the matching contract operation
//! - Encode results as payloads and map errors to response statuses

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info_span, warn};

use crate::contract::{ContainerContract, SmartContract, TxContext};
use crate::error::Result;
use crate::ledger::ChaincodeStub;
use crate::protocol::{self, Function, Invocation, Response};

/// Executes invocations against one ledger
///
/// Each call runs to completion on the caller's thread; the dispatcher
/// keeps no state besides its transaction counters.
pub struct Dispatcher<'a, C = SmartContract> {
    contract: C,
    stub: &'a dyn ChaincodeStub,
    tx_counter: AtomicU64,
    /// Successful invocations that changed world state
    write_counter: AtomicU64,
}

impl<'a> Dispatcher<'a> {
    /// Dispatcher for the container contract over `stub`
    pub fn new(stub: &'a dyn ChaincodeStub) -> Self {
        Self::with_contract(SmartContract::new(), stub)
    }
}

impl<'a, C: ContainerContract> Dispatcher<'a, C> {
    pub fn with_contract(contract: C, stub: &'a dyn ChaincodeStub) -> Self {
        Self {
            contract,
            stub,
            tx_counter: AtomicU64::new(0),
            write_counter: AtomicU64::new(0),
        }
    }

    /// Parse and execute a call by function name
    pub fn invoke<S: AsRef<str>>(&self, function: &str, args: &[S]) -> Response {
        match Invocation::parse(function, args) {
            Ok(invocation) => self.execute(invocation),
            Err(e) => {
                warn!(function, error = %e, "rejected invocation");
                Response::error(&e.to_string())
            }
        }
    }

    /// Execute a validated invocation
    ///
    /// `NotFound` maps to `Status::NotFound`; any other failure to
    /// `Status::Error` with the error message as payload.
    pub fn execute(&self, invocation: Invocation) -> Response {
        let tx_id = self.next_tx_id();
        let write = invocation.function.is_write();
        let span = info_span!("invoke", function = %invocation.function, tx_id = %tx_id, write);
        let _enter = span.enter();

        let ctx = TxContext::new(self.stub, tx_id);
        match self.run(&ctx, &invocation) {
            Ok(payload) => {
                if write {
                    self.write_counter.fetch_add(1, Ordering::Relaxed);
                }
                debug!("invocation succeeded");
                Response::ok(payload)
            }
            Err(e) if e.is_not_found() => Response::not_found(&e.to_string()),
            Err(e) => {
                warn!(error = %e, "invocation failed");
                Response::error(&e.to_string())
            }
        }
    }

    /// Number of transactions executed so far
    pub fn transactions(&self) -> u64 {
        self.tx_counter.load(Ordering::Relaxed)
    }

    /// Number of successful transactions that wrote world state
    pub fn writes(&self) -> u64 {
        self.write_counter.load(Ordering::Relaxed)
    }

    fn next_tx_id(&self) -> String {
        let n = self.tx_counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("tx-{:08}", n)
    }

    fn run(&self, ctx: &TxContext<'_>, invocation: &Invocation) -> Result<Option<Vec<u8>>> {
        let contract = &self.contract;
        match invocation.function {
            Function::Init => {
                contract.init(ctx)?;
                Ok(None)
            }
            Function::CreateOrUpdateContainer => {
                contract.create_or_update_container(ctx, invocation.arg(0), invocation.arg(1))?;
                Ok(None)
            }
            Function::ReadContainer => {
                let container = contract.read_container(ctx, invocation.arg(0))?;
                Ok(Some(protocol::encode_container(&container)))
            }
            Function::DeleteContainer => {
                contract.delete_container(ctx, invocation.arg(0))?;
                Ok(None)
            }
            Function::ContainerExists => {
                let exists = contract.container_exists(ctx, invocation.arg(0))?;
                Ok(Some(protocol::encode_bool(exists)))
            }
            Function::ReadContainerHistory => {
                let history = contract.read_container_history(ctx, invocation.arg(0))?;
                Ok(Some(protocol::encode_containers(&history)))
            }
            Function::GetAllContainers => {
                let containers = contract.get_all_containers(ctx)?;
                Ok(Some(protocol::encode_containers(&containers)))
            }
            Function::GetAllContainersHistory => {
                let histories = contract.get_all_containers_history(ctx)?;
                Ok(Some(protocol::encode_container_histories(&histories)))
            }
        }
    }
}
