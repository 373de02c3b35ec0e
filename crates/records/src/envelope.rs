//! Request payloads and response envelopes exchanged with the service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored record as the service returns it: suffix-tagged field names
/// mapped to arbitrary JSON values.
pub type RawRecord = Map<String, Value>;

pub type FetchResponse = Envelope<Vec<RawRecord>>;
pub type RecordResponse = Envelope<RawRecord>;

/// Response of the read calls.
///
/// `success == true` with no `data` is a normal "nothing there" answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn empty() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Response of the write calls: an overall flag plus one result per
/// submitted record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<BatchResult>>,
}

impl BatchResponse {
    pub fn ok(results: Vec<BatchResult>) -> Self {
        Self {
            success: true,
            message: None,
            results: Some(results),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            results: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RawRecord>,
}

impl BatchResult {
    pub fn ok(data: Option<RawRecord>) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Body of create and update calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordsPayload {
    pub records: Vec<RawRecord>,
}

/// Body of delete calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletePayload {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_tolerates_missing_data_and_message() {
        let envelope: FetchResponse = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.message, None);
    }

    #[test]
    fn batch_response_keeps_mixed_results() {
        let response: BatchResponse = serde_json::from_value(json!({
            "success": true,
            "results": [
                { "success": false, "message": "duplicate name" },
                { "success": true, "data": { "Id": 9, "Name": "Rent" } }
            ]
        }))
        .unwrap();
        let results = response.results.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].message.as_deref(), Some("duplicate name"));
        assert_eq!(results[1].data.as_ref().unwrap()["Id"], 9);
    }

    #[test]
    fn delete_payload_uses_record_ids_key() {
        let payload = DeletePayload {
            record_ids: vec![4],
        };
        assert_eq!(serde_json::to_value(payload).unwrap(), json!({ "RecordIds": [4] }));
    }
}
