//! Contract Module
//!
//! The container asset contract: a record type with a canonical encoding
//! and the operations the host dispatches to.
//!
//! ## Responsibilities
//! - Upsert, read, delete and existence checks keyed by container UID
//! - Per-key history and full-namespace listings
//! - Deterministic byte encoding so every peer stores identical values

mod container;
mod context;
mod smart_contract;

pub use container::{Container, Field, FIELD_ORDER};
pub use context::TxContext;
pub use smart_contract::{ContainerContract, SmartContract};
