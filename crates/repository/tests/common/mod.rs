#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use records::{
    BatchResponse, ClientError, DeletePayload, Envelope, FetchResponse, Query, RawRecord,
    RecordClient, RecordResponse, RecordsPayload,
};
use repository::{ChannelNotifier, Notifier, Toast};
use reqwest::StatusCode;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

/// What the stub answers for one kind of call.
#[derive(Clone, Debug)]
pub enum Reply<T> {
    Envelope(T),
    Status(StatusCode, Option<String>),
}

impl<T: Clone> Reply<T> {
    fn answer(&self) -> Result<T, ClientError> {
        match self {
            Self::Envelope(envelope) => Ok(envelope.clone()),
            Self::Status(status, message) => Err(ClientError::Server {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Fetch { table: String, query: Query },
    Get { table: String, id: i64 },
    Create { table: String, payload: RecordsPayload },
    Update { table: String, payload: RecordsPayload },
    Delete { table: String, payload: DeletePayload },
}

/// Record client answering every call with a canned reply and remembering
/// what it was asked.
#[derive(Debug)]
pub struct StubClient {
    pub fetch: Reply<FetchResponse>,
    pub get: Reply<RecordResponse>,
    pub write: Reply<BatchResponse>,
    calls: Mutex<Vec<Call>>,
}

impl Default for StubClient {
    fn default() -> Self {
        Self {
            fetch: Reply::Envelope(Envelope::ok(Vec::new())),
            get: Reply::Envelope(Envelope::empty()),
            write: Reply::Envelope(BatchResponse::ok(Vec::new())),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl StubClient {
    pub fn fetching(reply: Reply<FetchResponse>) -> Self {
        Self {
            fetch: reply,
            ..Self::default()
        }
    }

    pub fn getting(reply: Reply<RecordResponse>) -> Self {
        Self {
            get: reply,
            ..Self::default()
        }
    }

    pub fn writing(reply: Reply<BatchResponse>) -> Self {
        Self {
            write: reply,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RecordClient for StubClient {
    async fn fetch_records(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<FetchResponse, ClientError> {
        self.record(Call::Fetch {
            table: table.to_string(),
            query: query.clone(),
        });
        self.fetch.answer()
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        _query: &Query,
    ) -> Result<RecordResponse, ClientError> {
        self.record(Call::Get {
            table: table.to_string(),
            id,
        });
        self.get.answer()
    }

    async fn create_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<BatchResponse, ClientError> {
        self.record(Call::Create {
            table: table.to_string(),
            payload: payload.clone(),
        });
        self.write.answer()
    }

    async fn update_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<BatchResponse, ClientError> {
        self.record(Call::Update {
            table: table.to_string(),
            payload: payload.clone(),
        });
        self.write.answer()
    }

    async fn delete_records(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> Result<BatchResponse, ClientError> {
        self.record(Call::Delete {
            table: table.to_string(),
            payload: payload.clone(),
        });
        self.write.answer()
    }
}

pub fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(record) => record,
        other => panic!("expected an object, got {other}"),
    }
}

pub fn notifier() -> (Arc<dyn Notifier>, UnboundedReceiver<Toast>) {
    let (notifier, toasts) = ChannelNotifier::new();
    (Arc::new(notifier), toasts)
}

pub fn drain(toasts: &mut UnboundedReceiver<Toast>) -> Vec<String> {
    let mut messages = Vec::new();
    while let Ok(toast) = toasts.try_recv() {
        messages.push(toast.message);
    }
    messages
}
