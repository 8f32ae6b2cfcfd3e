//! Container record and its canonical encoding
//!
//! Stored values must be byte-identical on every peer that executes the
//! same transaction, so the encoder walks an explicit field table instead
//! of trusting a serializer's field order.
//!
//! ## Encoding
//! ```text
//! {"CID":"<cid>","UID":"<uid>"}
//! ```
//! No whitespace. Strings use JSON escapes, with `<`, `>`, `&`, U+2028 and
//! U+2029 additionally written as `\u003c`, `\u003e`, `\u0026`, `\u2028`
//! and `\u2029` to match values written by existing chaincode peers.

use std::fmt;

use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::error::{LedgerError, Result};

/// A container asset stored in world state under its UID
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    /// Associated content identifier
    pub cid: String,

    /// Primary key
    pub uid: String,
}

/// Serialized fields, in encoding order (alphabetical by field name)
pub const FIELD_ORDER: [Field; 2] = [Field::Cid, Field::Uid];

/// A serialized field of [`Container`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Cid,
    Uid,
}

impl Field {
    /// Name written in the encoded object
    pub fn name(self) -> &'static str {
        match self {
            Field::Cid => "CID",
            Field::Uid => "UID",
        }
    }

    fn value(self, container: &Container) -> &str {
        match self {
            Field::Cid => &container.cid,
            Field::Uid => &container.uid,
        }
    }

    fn value_mut(self, container: &mut Container) -> &mut String {
        match self {
            Field::Cid => &mut container.cid,
            Field::Uid => &mut container.uid,
        }
    }

    /// Field a decoded object key refers to, ignoring ASCII case
    fn matching(key: &str) -> Option<Field> {
        FIELD_ORDER
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(key))
    }
}

impl Container {
    pub fn new(uid: impl Into<String>, cid: impl Into<String>) -> Self {
        Self {
            cid: cid.into(),
            uid: uid.into(),
        }
    }

    /// Canonical bytes stored in world state
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = String::with_capacity(16 + self.cid.len() + self.uid.len());
        out.push('{');
        for (i, field) in FIELD_ORDER.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            push_json_string(&mut out, field.name());
            out.push(':');
            push_json_string(&mut out, field.value(self));
        }
        out.push('}');
        out.into_bytes()
    }

    /// Decode a value read from world state under `key`
    ///
    /// Field names match without regard to ASCII case and a repeated field
    /// keeps its last value. A `null` field value is skipped, missing fields
    /// stay empty and unknown fields are ignored. Anything but a JSON object
    /// fails.
    pub fn from_bytes(key: &str, bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| LedgerError::decode(key, e))
    }
}

impl<'de> Deserialize<'de> for Container {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ContainerVisitor)
    }
}

struct ContainerVisitor;

impl<'de> Visitor<'de> for ContainerVisitor {
    type Value = Container;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Container, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut container = Container::default();
        while let Some(name) = map.next_key::<String>()? {
            match Field::matching(&name) {
                Some(field) => {
                    if let Some(value) = map.next_value::<Option<String>>()? {
                        *field.value_mut(&mut container) = value;
                    }
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(container)
    }
}

fn push_json_string(out: &mut String, s: &str) {
    let quoted = serde_json::Value::from(s).to_string();
    for ch in quoted.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
}
