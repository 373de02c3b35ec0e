use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A relation field as returned by the service.
///
/// Lookup fields come back either expanded (`{ "Id": 3, "Name": "Food" }`)
/// or as the bare identifier of the related record. Decoding never fails:
/// ids given as floats or strings are accepted and any other shape is kept
/// as its JSON text.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Relation {
    Expanded {
        #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
        id: Option<i64>,
        #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Id(i64),
    Text(String),
}

/// Integer id carried by `value`: an integer, an integral float or a
/// numeric string.
pub fn value_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|id| id.is_finite() && id.fract() == 0.0)
                .map(|id| id as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

impl From<Value> for Relation {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::Expanded {
                id: fields.get("Id").and_then(value_id),
                name: fields.get("Name").and_then(value_text),
            },
            Value::String(text) => Self::Text(text),
            Value::Number(_) => match value_id(&value) {
                Some(id) => Self::Id(id),
                None => Self::Text(value.to_string()),
            },
            other => Self::Text(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Relation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl Relation {
    /// The string shown for this relation: the related record's display
    /// name when expanded, otherwise the raw value.
    pub fn resolve(&self) -> Option<String> {
        match self {
            Self::Expanded {
                name: Some(name), ..
            } if !name.is_empty() => Some(name.clone()),
            Self::Expanded { id, .. } => id.map(|id| id.to_string()),
            Self::Id(id) => Some(id.to_string()),
            Self::Text(text) => Some(text.clone()),
        }
    }
}
