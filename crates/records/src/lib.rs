//! Record-storage client.
//!
//! The remote service stores flat records in named tables and answers every
//! call with a `{ success, message, data | results }` envelope. This crate
//! models that contract ([`RecordClient`]), the query and envelope shapes,
//! and ships two clients: [`HttpRecordClient`] talking to the hosted service
//! and [`MemoryRecordClient`] keeping tables in process.

use std::sync::Arc;

use async_trait::async_trait;

pub use envelope::{
    BatchResponse, BatchResult, DeletePayload, Envelope, FetchResponse, RawRecord,
    RecordResponse, RecordsPayload,
};
pub use error::ClientError;
pub use http::{HttpRecordClient, HttpRecordClientBuilder};
pub use memory::MemoryRecordClient;
pub use query::{FieldSelection, Filter, Operator, OrderBy, PagingInfo, Query, SortDirection};
pub use relation::{Relation, value_id};

mod envelope;
mod error;
mod http;
mod memory;
mod query;
mod relation;

/// Primary key field present on every stored record.
pub const ID_FIELD: &str = "Id";

/// CRUD over the tables of the remote service.
///
/// An `Err` means the exchange itself failed (transport, non-2xx status).
/// A completed exchange that the service rejected comes back as `Ok` with
/// `success == false`.
#[async_trait]
pub trait RecordClient: Send + Sync {
    async fn fetch_records(&self, table: &str, query: &Query)
    -> Result<FetchResponse, ClientError>;

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        query: &Query,
    ) -> Result<RecordResponse, ClientError>;

    async fn create_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<BatchResponse, ClientError>;

    async fn update_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<BatchResponse, ClientError>;

    async fn delete_records(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> Result<BatchResponse, ClientError>;
}

#[async_trait]
impl<T: RecordClient + ?Sized> RecordClient for Arc<T> {
    async fn fetch_records(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<FetchResponse, ClientError> {
        (**self).fetch_records(table, query).await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        query: &Query,
    ) -> Result<RecordResponse, ClientError> {
        (**self).get_record_by_id(table, id, query).await
    }

    async fn create_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<BatchResponse, ClientError> {
        (**self).create_records(table, payload).await
    }

    async fn update_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<BatchResponse, ClientError> {
        (**self).update_records(table, payload).await
    }

    async fn delete_records(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> Result<BatchResponse, ClientError> {
        (**self).delete_records(table, payload).await
    }
}
