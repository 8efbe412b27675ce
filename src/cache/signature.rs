//! Signature Module
//!
//! Request attributes and the deterministic signature that keys the cache.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// == Attribute Value ==
/// A single typed request attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    String(String),
    Int64(i64),
    Double(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    /// Duration in milliseconds
    #[serde(rename = "duration_ms")]
    Duration(u64),
    StringMap(BTreeMap<String, String>),
}

impl AttributeValue {
    fn tag(&self) -> u8 {
        match self {
            AttributeValue::String(_) => 1,
            AttributeValue::Int64(_) => 2,
            AttributeValue::Double(_) => 3,
            AttributeValue::Bool(_) => 4,
            AttributeValue::Bytes(_) => 5,
            AttributeValue::Timestamp(_) => 6,
            AttributeValue::Duration(_) => 7,
            AttributeValue::StringMap(_) => 8,
        }
    }

    fn feed(&self, hasher: &mut Sha256) {
        hasher.update([self.tag()]);
        match self {
            AttributeValue::String(s) => feed_bytes(hasher, s.as_bytes()),
            AttributeValue::Int64(v) => hasher.update(v.to_le_bytes()),
            AttributeValue::Double(v) => hasher.update(v.to_bits().to_le_bytes()),
            AttributeValue::Bool(v) => hasher.update([u8::from(*v)]),
            AttributeValue::Bytes(b) => feed_bytes(hasher, b),
            AttributeValue::Timestamp(ts) => {
                hasher.update(ts.timestamp().to_le_bytes());
                hasher.update(ts.timestamp_subsec_nanos().to_le_bytes());
            }
            AttributeValue::Duration(ms) => hasher.update(ms.to_le_bytes()),
            AttributeValue::StringMap(map) => {
                hasher.update((map.len() as u64).to_le_bytes());
                for (key, value) in map {
                    feed_bytes(hasher, key.as_bytes());
                    feed_bytes(hasher, value.as_bytes());
                }
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int64(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

// == Attributes ==
/// The set of attributes describing one check request.
///
/// Kept ordered by name so that the signature never depends on the order
/// attributes were added in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces an attribute, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, AttributeValue)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// == Signature ==
/// Computes the cache key for a set of attributes.
///
/// Pure and deterministic: hex-encoded SHA-256 over every attribute in name
/// order. Names and variable-length values are length-prefixed and every
/// value carries a type tag, so `{"ab": "c"}` and `{"a": "bc"}`, or
/// `Int64(1)` and `String("1")`, never collide by construction.
pub fn signature(attributes: &Attributes) -> String {
    let mut hasher = Sha256::new();
    for (name, value) in attributes.iter() {
        feed_bytes(&mut hasher, name.as_bytes());
        value.feed(&mut hasher);
    }
    hex::encode(hasher.finalize().as_slice())
}

fn feed_bytes(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_hex_sha256() {
        let sig = signature(&Attributes::new().with("op", "auth"));
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_deterministic() {
        let a = Attributes::new().with("op", "auth").with("user", "alice");
        let b = Attributes::new().with("user", "alice").with("op", "auth");
        assert_eq!(signature(&a), signature(&b));
    }

    #[test]
    fn test_signature_distinguishes_values() {
        let a = Attributes::new().with("op", "auth");
        let b = Attributes::new().with("op", "read");
        assert_ne!(signature(&a), signature(&b));
    }

    #[test]
    fn test_signature_distinguishes_types() {
        let a = Attributes::new().with("n", 1i64);
        let b = Attributes::new().with("n", "1");
        assert_ne!(signature(&a), signature(&b));
    }

    #[test]
    fn test_signature_name_value_boundaries() {
        let a = Attributes::new().with("ab", "c");
        let b = Attributes::new().with("a", "bc");
        assert_ne!(signature(&a), signature(&b));
    }

    #[test]
    fn test_signature_string_map() {
        let mut headers = BTreeMap::new();
        headers.insert("x-user".to_string(), "alice".to_string());
        let a = Attributes::new().with("headers", AttributeValue::StringMap(headers.clone()));

        headers.insert("x-user".to_string(), "bob".to_string());
        let b = Attributes::new().with("headers", AttributeValue::StringMap(headers));

        assert_ne!(signature(&a), signature(&b));
    }

    #[test]
    fn test_attributes_deserialize() {
        let json = r#"{"op": {"string": "auth"}, "port": {"int64": 8080}, "ttl": {"duration_ms": 50}}"#;
        let attrs: Attributes = serde_json::from_str(json).unwrap();

        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get("op"), Some(&AttributeValue::String("auth".to_string())));
        assert_eq!(attrs.get("port"), Some(&AttributeValue::Int64(8080)));
        assert_eq!(attrs.get("ttl"), Some(&AttributeValue::Duration(50)));
    }
}
