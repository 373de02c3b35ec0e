//! The generic repository shared by every entity.

use std::{marker::PhantomData, sync::Arc};

use records::{
    BatchResponse, BatchResult, ClientError, DeletePayload, Query, RawRecord, RecordClient,
    RecordsPayload,
};
use serde_json::Value;

use crate::{
    RecordKey,
    notify::{Notifier, Toast, TracingNotifier},
    schema::{Schema, to_raw},
};

/// Maximum number of records returned by a list call.
pub const LIST_LIMIT: u32 = 100;

/// Whether a remote-reported failure is also shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reporting {
    Toast,
    LogOnly,
}

/// CRUD over one entity table.
///
/// No operation returns an error: failures are logged (and, when the
/// service explains itself, toasted) and turned into an empty list, `None`
/// or `false`.
pub struct Repository<S, C> {
    client: C,
    table: String,
    notifier: Arc<dyn Notifier>,
    schema: PhantomData<fn() -> S>,
}

impl<S: Schema, C: RecordClient> Repository<S, C> {
    /// A repository on the schema's default table, toasting through
    /// [`TracingNotifier`].
    pub fn new(client: C) -> Self {
        Self {
            client,
            table: S::TABLE.to_string(),
            notifier: Arc::new(TracingNotifier),
            schema: PhantomData,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn select() -> Query {
        Query::select(S::FIELDS.iter().copied())
    }

    /// Up to [`LIST_LIMIT`] records in the entity's canonical order.
    pub async fn list(&self) -> Vec<S::Domain> {
        let mut query = Self::select();
        if let Some((field, direction)) = S::ORDER {
            query = query.order_by(field, direction);
        }
        self.fetch(&query.paging(LIST_LIMIT, 0), Reporting::Toast)
            .await
    }

    pub async fn get_by_id(&self, id: impl RecordKey) -> Option<S::Domain> {
        let id = self.coerce(id)?;
        match self
            .client
            .get_record_by_id(&self.table, id, &Self::select())
            .await
        {
            Ok(response) if !response.success => {
                self.remote_failure(response.message, Reporting::Toast);
                None
            }
            Ok(response) => response.data.and_then(|record| self.decode(record)),
            Err(err) => {
                self.exchange_failure("fetching", Some(id), &err);
                None
            }
        }
    }

    pub async fn create(&self, input: &S::Input) -> Option<S::Domain> {
        let payload = self.payload(&S::create_fields(input))?;
        match self.client.create_records(&self.table, &payload).await {
            Ok(response) => self.first_success(response, "create"),
            Err(err) => {
                self.exchange_failure("creating", None, &err);
                None
            }
        }
    }

    pub async fn update(&self, id: impl RecordKey, input: &S::Input) -> Option<S::Domain> {
        let id = self.coerce(id)?;
        let payload = self.payload(&S::update_fields(id, input))?;
        match self.client.update_records(&self.table, &payload).await {
            Ok(response) => self.first_success(response, "update"),
            Err(err) => {
                self.exchange_failure("updating", Some(id), &err);
                None
            }
        }
    }

    /// `true` when at least one record was deleted.
    pub async fn delete(&self, id: impl RecordKey) -> bool {
        let Some(id) = self.coerce(id) else {
            return false;
        };
        let payload = DeletePayload {
            record_ids: vec![id],
        };
        match self.client.delete_records(&self.table, &payload).await {
            Ok(response) => self
                .successes(response, "delete")
                .is_some_and(|succeeded| !succeeded.is_empty()),
            Err(err) => {
                self.exchange_failure("deleting", Some(id), &err);
                false
            }
        }
    }

    pub(crate) async fn fetch(&self, query: &Query, reporting: Reporting) -> Vec<S::Domain> {
        match self.client.fetch_records(&self.table, query).await {
            Ok(response) if !response.success => {
                self.remote_failure(response.message, reporting);
                Vec::new()
            }
            Ok(response) => response
                .data
                .unwrap_or_default()
                .into_iter()
                .filter_map(|record| self.decode(record))
                .collect(),
            Err(err) => {
                self.exchange_failure("fetching", None, &err);
                Vec::new()
            }
        }
    }

    fn coerce(&self, id: impl RecordKey) -> Option<i64> {
        let coerced = id.record_id();
        if coerced.is_none() {
            tracing::warn!(entity = S::ENTITY, table = %self.table, "ignoring non-numeric record id");
        }
        coerced
    }

    fn payload(&self, fields: &S::Fields) -> Option<RecordsPayload> {
        match to_raw(fields) {
            Ok(record) => Some(RecordsPayload {
                records: vec![record],
            }),
            Err(err) => {
                tracing::error!(entity = S::ENTITY, table = %self.table, "cannot encode {} fields: {err}", S::ENTITY);
                None
            }
        }
    }

    fn decode(&self, record: RawRecord) -> Option<S::Domain> {
        match serde_json::from_value::<S::Record>(Value::Object(record)) {
            Ok(record) => Some(S::to_domain(record)),
            Err(err) => {
                tracing::warn!(entity = S::ENTITY, table = %self.table, "skipping {} record without a usable id: {err}", S::ENTITY);
                None
            }
        }
    }

    /// Splits a batch response, reporting every failed record. `None` when
    /// the whole call was rejected.
    fn successes(&self, response: BatchResponse, action: &str) -> Option<Vec<BatchResult>> {
        if !response.success {
            self.remote_failure(response.message, Reporting::Toast);
            return None;
        }

        let (succeeded, failed): (Vec<_>, Vec<_>) = response
            .results
            .unwrap_or_default()
            .into_iter()
            .partition(|result| result.success);

        if !failed.is_empty() {
            let details = serde_json::to_string(&failed).unwrap_or_default();
            tracing::error!(
                entity = S::ENTITY,
                table = %self.table,
                failed = failed.len(),
                "failed to {action} {} {}: {details}",
                failed.len(),
                S::ENTITY
            );
            for message in failed.into_iter().filter_map(|result| result.message) {
                self.notifier.notify(Toast::error(message));
            }
        }
        Some(succeeded)
    }

    fn first_success(&self, response: BatchResponse, action: &str) -> Option<S::Domain> {
        let first = self.successes(response, action)?.into_iter().next()?;
        match first.data {
            Some(record) => self.decode(record),
            None => {
                tracing::warn!(entity = S::ENTITY, table = %self.table, "{action} succeeded without returning the record");
                None
            }
        }
    }

    fn remote_failure(&self, message: Option<String>, reporting: Reporting) {
        tracing::error!(
            entity = S::ENTITY,
            table = %self.table,
            "{} request rejected: {}",
            S::ENTITY,
            message.as_deref().unwrap_or("no message")
        );
        if let (Reporting::Toast, Some(message)) = (reporting, message) {
            self.notifier.notify(Toast::error(message));
        }
    }

    fn exchange_failure(&self, action: &str, id: Option<i64>, err: &ClientError) {
        match id {
            Some(id) => tracing::error!(
                entity = S::ENTITY,
                table = %self.table,
                id,
                "error {action} {} {id}: {}",
                S::ENTITY,
                err.message()
            ),
            None => tracing::error!(
                entity = S::ENTITY,
                table = %self.table,
                "error {action} {}: {}",
                S::ENTITY,
                err.message()
            ),
        }
    }
}
