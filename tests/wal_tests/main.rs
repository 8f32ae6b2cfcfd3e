//! WAL Tests
//!
//! Tests verify:
//! - Entry framing and checksum validation
//! - Appending with each sync strategy
//! - Reading back entries in LSN order
//! - Recovery from torn writes and corrupted entries

mod common;
mod recovery_tests;
