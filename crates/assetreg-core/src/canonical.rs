//! # Canonical Serialization — JCS-Compatible Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! written to world state by the asset registry.
//!
//! ## Determinism Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which:
//!
//! 1. Converts the value into a `serde_json::Value` tree.
//! 2. Rebuilds every object in the tree with its keys in ascending order,
//!    recursing into nested objects and arrays. Array element order is kept.
//! 3. Serializes with `serde_jcs` (RFC 8785): compact separators, standard
//!    JSON string escaping, minimal number formatting, literal `true`,
//!    `false` and `null`.
//!
//! Two records holding the same logical fields therefore encode to the same
//! bytes no matter in which order the fields were populated in memory.
//!
//! ## Round Trip
//!
//! [`decode`] parses canonical output back into a `Value`. Re-encoding the
//! decoded value reproduces the original bytes exactly.
//!
//! ## Numbers
//!
//! Integers are written in plain decimal. Floats use the ECMAScript shortest
//! round-trip form that JCS mandates (`100.0` is written as `100`). Non-finite
//! floats have no JSON representation; `serde_json` maps them to `null`
//! before canonicalization sees them.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by recursive key sorting followed by JCS
/// serialization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - Object keys are sorted at every nesting level.
/// - No insignificant whitespace.
/// - The content is valid UTF-8 JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(String);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value cannot
    /// be represented as JSON (for example a map with non-string keys) or if
    /// JCS serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let sorted = sort_keys(value);
        let s = serde_jcs::to_string(&sorted)?;
        Ok(Self(s))
    }

    /// Access the canonical bytes for storage or digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Access the canonical encoding as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned byte buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the canonical bytes back into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, CanonicalizationError> {
        serde_json::from_str(&self.0).map_err(CanonicalizationError::Decode)
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for CanonicalBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse bytes previously produced by [`CanonicalBytes::new`] into a JSON value.
///
/// Accepts any valid JSON, canonical or not. Feeding the result back into
/// `CanonicalBytes::new` yields canonical bytes; for input that was already
/// canonical, those bytes are identical to the input.
pub fn decode(bytes: &[u8]) -> Result<Value, CanonicalizationError> {
    serde_json::from_slice(bytes).map_err(CanonicalizationError::Decode)
}

/// Rebuild every object in the tree with ascending key order.
///
/// `serde_json::Map` iteration order depends on the `preserve_order` feature,
/// which any crate in the build graph can switch on, so ordering is imposed
/// here explicitly rather than inherited from the map type.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k, sort_keys(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_ ]{0,30}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonical_bytes_never_fail(value in json_value()) {
            prop_assert!(CanonicalBytes::new(&value).is_ok());
        }

        #[test]
        fn canonical_bytes_deterministic(value in json_value()) {
            let a = CanonicalBytes::new(&value).unwrap();
            let b = CanonicalBytes::new(&value).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        #[test]
        fn reencoding_is_idempotent(value in json_value()) {
            let first = CanonicalBytes::new(&value).unwrap();
            let second = CanonicalBytes::new(&decode(first.as_bytes()).unwrap()).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn insertion_order_is_irrelevant(
            pairs in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 1..10)
        ) {
            let forward: Vec<(String, i64)> = pairs.clone().into_iter().collect();
            let mut reversed = forward.clone();
            reversed.reverse();

            let build = |entries: Vec<(String, i64)>| {
                let mut map = Map::new();
                for (k, v) in entries {
                    map.insert(k, serde_json::json!(v));
                }
                Value::Object(map)
            };
            let a = CanonicalBytes::new(&build(forward)).unwrap();
            let b = CanonicalBytes::new(&build(reversed)).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn output_has_no_whitespace_outside_strings(
            pairs in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..10)
        ) {
            let cb = CanonicalBytes::new(&pairs).unwrap();
            prop_assert!(!cb.as_str().contains(' '));
            prop_assert!(!cb.as_str().contains('\n'));
        }
    }
}
