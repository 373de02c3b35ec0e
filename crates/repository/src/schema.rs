//! Per-entity mapping between storage records and domain objects.

use api_types::Numeric;
use records::{RawRecord, SortDirection};
use serde::{Serialize, de::DeserializeOwned, ser::Error as _};
use serde_json::Value;

/// Describes one entity table.
///
/// `Record` is the typed view of a stored record (suffix-tagged field names,
/// relations as [`records::Relation`]); `Fields` is what gets written back.
pub trait Schema: Send + Sync + 'static {
    type Record: DeserializeOwned;
    type Domain: Send;
    type Input: Sync;
    type Fields: Serialize;

    /// Singular name used in logs.
    const ENTITY: &'static str;
    const TABLE: &'static str;
    /// Fields requested on every read.
    const FIELDS: &'static [&'static str];
    /// Canonical ordering of `list()`.
    const ORDER: Option<(&'static str, SortDirection)> = None;

    fn to_domain(record: Self::Record) -> Self::Domain;

    fn create_fields(input: &Self::Input) -> Self::Fields;

    fn update_fields(id: i64, input: &Self::Input) -> Self::Fields;
}

pub(crate) fn to_raw<T: Serialize>(fields: &T) -> Result<RawRecord, serde_json::Error> {
    match serde_json::to_value(fields)? {
        Value::Object(record) => Ok(record),
        other => Err(serde_json::Error::custom(format!(
            "expected record fields, got {other}"
        ))),
    }
}

/// `Some` only for non-empty strings.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

pub(crate) fn float(value: Option<&Numeric>) -> Option<f64> {
    value.and_then(Numeric::to_f64)
}

/// Float coercion where an absent or blank input means `default`.
pub(crate) fn float_or(value: Option<&Numeric>, default: f64) -> Option<f64> {
    match value {
        None => Some(default),
        Some(Numeric::Text(text)) if text.is_empty() => Some(default),
        Some(value) => value.to_f64(),
    }
}

/// Integer coercion where an absent, blank or zero input means `default`.
pub(crate) fn int_or(value: Option<&Numeric>, default: i64) -> Option<i64> {
    match value {
        None => Some(default),
        Some(Numeric::Text(text)) if text.is_empty() => Some(default),
        Some(Numeric::Number(number)) if *number == 0.0 => Some(default),
        Some(value) => value.to_i64(),
    }
}

/// Relation ids: anything that is not a non-zero integer is "no relation".
pub(crate) fn relation_id(value: Option<&Numeric>) -> Option<i64> {
    value.and_then(Numeric::to_i64).filter(|id| *id != 0)
}
