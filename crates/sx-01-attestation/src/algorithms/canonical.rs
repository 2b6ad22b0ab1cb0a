//! # Canonicalization
//!
//! Flattens a [`PayloadValue`] tree into JSON-safe primitives.
//!
//! | Variant | Result |
//! |---------|--------|
//! | Mapping | object, values canonicalized, keys unchanged |
//! | Sequence | array, order kept |
//! | Timestamp | ISO-8601 string |
//! | Identifier | canonical string form |
//! | Scalar | unchanged (non-finite floats become null) |
//!
//! Key order of the resulting object is irrelevant: the encoder sorts.

use crate::domain::{PayloadValue, Scalar, Timestamp};
use serde_json::{Map, Number, Value};

/// Recursively canonicalize a payload value.
pub fn canonicalize(value: &PayloadValue) -> Value {
    match value {
        PayloadValue::Mapping(entries) => {
            let mut object = Map::with_capacity(entries.len());
            for (key, item) in entries {
                object.insert(key.clone(), canonicalize(item));
            }
            Value::Object(object)
        }
        PayloadValue::Sequence(items) => Value::Array(items.iter().map(canonicalize).collect()),
        PayloadValue::Timestamp(timestamp) => Value::String(iso_timestamp(timestamp)),
        PayloadValue::Identifier(identifier) => Value::String(identifier.canonical_string()),
        PayloadValue::Scalar(scalar) => scalar_value(scalar),
    }
}

fn scalar_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Null => Value::Null,
        Scalar::Bool(b) => Value::Bool(*b),
        Scalar::Int(i) => Value::Number(Number::from(*i)),
        Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        Scalar::Text(s) => Value::String(s.clone()),
    }
}

/// ISO-8601 rendering: `YYYY-MM-DD` for dates, and for instants
/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` in UTC with no offset suffix. The fraction
/// is printed at microsecond precision and omitted when it is zero.
pub fn iso_timestamp(timestamp: &Timestamp) -> String {
    match timestamp {
        Timestamp::Date(date) => date.format("%Y-%m-%d").to_string(),
        Timestamp::DateTime(at) => {
            let naive = at.naive_utc();
            let micros = at.timestamp_subsec_micros();
            if micros == 0 {
                naive.format("%Y-%m-%dT%H:%M:%S").to_string()
            } else {
                format!("{}.{:06}", naive.format("%Y-%m-%dT%H:%M:%S"), micros)
            }
        }
    }
}
