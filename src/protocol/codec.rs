//! Payload codec
//!
//! Encoding and decoding of invocation results.
//!
//! ## Payload Format
//! - unit:               empty
//! - bool:               `true` / `false`
//! - container:          canonical container bytes
//! - container list:     `[` items joined by `,` `]`
//! - list of histories:  `[` container lists joined by `,` `]`
//!
//! Lists are assembled from canonical container bytes so a payload is as
//! deterministic as the values it was read from.

use crate::contract::Container;
use crate::error::{LedgerError, Result};

/// Key reported in decode errors for payloads
const PAYLOAD_KEY: &str = "<payload>";

// =============================================================================
// Encoding
// =============================================================================

pub fn encode_bool(value: bool) -> Vec<u8> {
    if value {
        b"true".to_vec()
    } else {
        b"false".to_vec()
    }
}

pub fn encode_container(container: &Container) -> Vec<u8> {
    container.to_canonical_bytes()
}

pub fn encode_containers(containers: &[Container]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + containers.len() * 32);
    write_list(&mut out, containers);
    out
}

pub fn encode_container_histories(histories: &[Vec<Container>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.push(b'[');
    for (i, history) in histories.iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        write_list(&mut out, history);
    }
    out.push(b']');
    out
}

fn write_list(out: &mut Vec<u8>, containers: &[Container]) {
    out.push(b'[');
    for (i, container) in containers.iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        out.extend_from_slice(&container.to_canonical_bytes());
    }
    out.push(b']');
}

// =============================================================================
// Decoding
// =============================================================================

pub fn decode_bool(bytes: &[u8]) -> Result<bool> {
    match bytes {
        b"true" => Ok(true),
        b"false" => Ok(false),
        other => Err(LedgerError::Protocol(format!(
            "expected boolean payload, got {:?}",
            String::from_utf8_lossy(other)
        ))),
    }
}

pub fn decode_container(bytes: &[u8]) -> Result<Container> {
    Container::from_bytes(PAYLOAD_KEY, bytes)
}

pub fn decode_containers(bytes: &[u8]) -> Result<Vec<Container>> {
    serde_json::from_slice(bytes).map_err(|e| LedgerError::decode(PAYLOAD_KEY, e))
}

pub fn decode_container_histories(bytes: &[u8]) -> Result<Vec<Vec<Container>>> {
    serde_json::from_slice(bytes).map_err(|e| LedgerError::decode(PAYLOAD_KEY, e))
}
