//! Field decoders for stored records.
//!
//! A mistyped optional attribute decodes as `None` so the rest of the record
//! survives. Only an unusable `Id` rejects a record.

use api_types::parse_float;
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

pub(crate) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    records::value_id(&value)
        .ok_or_else(|| D::Error::custom(format!("unusable record id {value}")))
}

/// A number, or a string starting with one.
pub(crate) fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        Value::String(text) => parse_float(&text),
        _ => None,
    })
}

/// A string; numbers and booleans are kept as their text.
pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}
