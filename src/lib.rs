//! # Container Ledger
//!
//! An asset contract for a permissioned ledger, managing container records
//! keyed by a unique identifier:
//! - Create/update, read, delete and existence checks
//! - Per-key version history and full-namespace listings
//! - Deterministic record encoding so every peer stores identical bytes
//! - Injected ledger stub, with in-memory and journal-backed implementations
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Host / container-peer CLI                    │
//! │              (function name + string args)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Dispatcher                              │
//! │          (tx context, payload encoding, status)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    SmartContract                             │
//! │                 (ContainerContract)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  ChaincodeStub
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │MemoryLedger │          │ FileLedger  │
//!   │  (RwLock)   │          │   (WAL)     │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod wal;
pub mod ledger;
pub mod contract;
pub mod protocol;
pub mod dispatch;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LedgerError, Result};
pub use config::Config;
pub use contract::{Container, ContainerContract, SmartContract, TxContext};
pub use dispatch::Dispatcher;
pub use ledger::{ChaincodeStub, FileLedger, MemoryLedger};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the container ledger
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
