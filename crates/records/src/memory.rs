//! In-process record store.
//!
//! Honours the parts of the query contract the repositories rely on:
//! field selection, ordering, exact-match filters and paging.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    BatchResponse, BatchResult, ClientError, DeletePayload, Envelope, FetchResponse, ID_FIELD,
    Operator, Query, RawRecord, RecordClient, RecordResponse, RecordsPayload, SortDirection,
};

#[derive(Debug, Default)]
pub struct MemoryRecordClient {
    tables: RwLock<HashMap<String, Table>>,
}

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, RawRecord>,
}

impl Table {
    fn insert(&mut self, mut record: RawRecord) -> RawRecord {
        self.last_id += 1;
        let id = self.last_id;
        record.insert(ID_FIELD.to_string(), Value::from(id));
        self.rows.insert(id, record.clone());
        record
    }
}

impl MemoryRecordClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` as is (any `Id` is replaced) and returns its new id.
    pub async fn seed(&self, table: &str, record: RawRecord) -> i64 {
        let mut tables = self.tables.write().await;
        let stored = tables.entry(table.to_string()).or_default().insert(record);
        record_id(&stored).unwrap_or_default()
    }

    /// Snapshot of a table in id order.
    pub async fn records(&self, table: &str) -> Vec<RawRecord> {
        let tables = self.tables.read().await;
        tables
            .get(table)
            .map(|table| table.rows.values().cloned().collect())
            .unwrap_or_default()
    }
}

fn record_id(record: &RawRecord) -> Option<i64> {
    record.get(ID_FIELD).and_then(Value::as_i64)
}

fn project(record: &RawRecord, query: &Query) -> RawRecord {
    record
        .iter()
        .filter(|(field, _)| query.selects(field))
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect()
}

fn matches(record: &RawRecord, query: &Query) -> bool {
    query.filters.iter().all(|filter| match filter.operator {
        Operator::EqualTo => {
            let value = record.get(&filter.field_name).unwrap_or(&Value::Null);
            filter.values.iter().any(|expected| expected == value)
        }
    })
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
    }
}

#[async_trait]
impl RecordClient for MemoryRecordClient {
    async fn fetch_records(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<FetchResponse, ClientError> {
        let tables = self.tables.read().await;
        let Some(table) = tables.get(table) else {
            return Ok(Envelope::ok(Vec::new()));
        };

        let mut rows: Vec<&RawRecord> = table
            .rows
            .values()
            .filter(|record| matches(record, query))
            .collect();
        for order in query.order_by.iter().rev() {
            rows.sort_by(|a, b| {
                let ordering = compare(a.get(&order.field_name), b.get(&order.field_name));
                match order.sort_type {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let (offset, limit) = query
            .paging_info
            .map(|paging| (paging.offset as usize, paging.limit as usize))
            .unwrap_or((0, usize::MAX));
        let data = rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|record| project(record, query))
            .collect();
        Ok(Envelope::ok(data))
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        query: &Query,
    ) -> Result<RecordResponse, ClientError> {
        let tables = self.tables.read().await;
        let record = tables
            .get(table)
            .and_then(|table| table.rows.get(&id))
            .map(|record| project(record, query));
        Ok(match record {
            Some(record) => Envelope::ok(record),
            None => Envelope::empty(),
        })
    }

    async fn create_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<BatchResponse, ClientError> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(table.to_string()).or_default();
        let results = payload
            .records
            .iter()
            .map(|record| {
                let mut record = record.clone();
                record.remove(ID_FIELD);
                BatchResult::ok(Some(table.insert(record)))
            })
            .collect();
        Ok(BatchResponse::ok(results))
    }

    async fn update_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<BatchResponse, ClientError> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(table.to_string()).or_default();
        let results = payload
            .records
            .iter()
            .map(|record| {
                let Some(id) = record_id(record) else {
                    return BatchResult::failed("Id is required");
                };
                let Some(stored) = table.rows.get_mut(&id) else {
                    return BatchResult::failed(format!("Record with Id {id} not found"));
                };
                for (field, value) in record {
                    stored.insert(field.clone(), value.clone());
                }
                BatchResult::ok(Some(stored.clone()))
            })
            .collect();
        Ok(BatchResponse::ok(results))
    }

    async fn delete_records(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> Result<BatchResponse, ClientError> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(table.to_string()).or_default();
        let results = payload
            .record_ids
            .iter()
            .map(|id| match table.rows.remove(id) {
                Some(_) => BatchResult::ok(None),
                None => BatchResult::failed(format!("Record with Id {id} not found")),
            })
            .collect();
        Ok(BatchResponse::ok(results))
    }
}
