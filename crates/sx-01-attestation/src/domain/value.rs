//! # Payload Value Tree
//!
//! The closed set of shapes a payload may contain before canonicalization.
//! Anything that wants to be attested converts itself into a `PayloadValue`
//! through [`ToPayloadValue`].

use chrono::{DateTime, NaiveDate, Utc};
use shared_crypto::Address;
use shared_types::ObjectId;

/// A nested payload value.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    /// Key/value pairs in insertion order. Order never reaches the output.
    Mapping(Vec<(String, PayloadValue)>),
    /// Ordered elements (lists and fixed-size tuples alike).
    Sequence(Vec<PayloadValue>),
    /// Calendar date or instant.
    Timestamp(Timestamp),
    /// Opaque reference rendered through its canonical string form.
    Identifier(Identifier),
    /// Leaf value passed through unchanged.
    Scalar(Scalar),
}

/// Date or date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

/// Opaque identifiers that appear in payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier {
    /// Store document reference.
    Object(ObjectId),
    /// Ledger address.
    Address(Address),
}

impl Identifier {
    /// Canonical string form.
    pub fn canonical_string(&self) -> String {
        match self {
            Identifier::Object(id) => id.to_hex(),
            Identifier::Address(address) => address.to_base58(),
        }
    }
}

/// JSON leaf values.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl PayloadValue {
    /// Build a mapping from `(key, value)` pairs.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PayloadValue)>,
    {
        PayloadValue::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a sequence from anything convertible.
    pub fn sequence<T, I>(items: I) -> Self
    where
        T: Into<PayloadValue>,
        I: IntoIterator<Item = T>,
    {
        PayloadValue::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// The null scalar.
    pub const fn null() -> Self {
        PayloadValue::Scalar(Scalar::Null)
    }

    /// Look up a key in a mapping (last occurrence wins, like the encoder).
    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        match self {
            PayloadValue::Mapping(entries) => entries
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Conversion into the payload value tree.
pub trait ToPayloadValue {
    /// Produce the value tree for this item.
    fn to_payload_value(&self) -> PayloadValue;
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        PayloadValue::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        PayloadValue::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        PayloadValue::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Scalar(Scalar::Text(value.to_string()))
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Scalar(Scalar::Text(value))
    }
}

impl From<ObjectId> for PayloadValue {
    fn from(value: ObjectId) -> Self {
        PayloadValue::Identifier(Identifier::Object(value))
    }
}

impl From<Address> for PayloadValue {
    fn from(value: Address) -> Self {
        PayloadValue::Identifier(Identifier::Address(value))
    }
}

impl From<NaiveDate> for PayloadValue {
    fn from(value: NaiveDate) -> Self {
        PayloadValue::Timestamp(Timestamp::Date(value))
    }
}

impl From<DateTime<Utc>> for PayloadValue {
    fn from(value: DateTime<Utc>) -> Self {
        PayloadValue::Timestamp(Timestamp::DateTime(value))
    }
}

impl<T: Into<PayloadValue>> From<Option<T>> for PayloadValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PayloadValue::null(), Into::into)
    }
}
