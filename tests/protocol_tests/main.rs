//! Protocol Tests
//!
//! Tests verify:
//! - Function name and arity validation
//! - Payload encoding matches the canonical container encoding
//! - Dispatch routes calls and maps errors to statuses

mod invocation_tests;
