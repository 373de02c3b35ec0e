//! HTTP client for the hosted record service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, header};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    BatchResponse, ClientError, DeletePayload, FetchResponse, Query, RecordClient,
    RecordResponse, RecordsPayload,
};

const PROJECT_ID_HEADER: &str = "x-project-id";
const PUBLIC_KEY_HEADER: &str = "x-public-key";

#[derive(Clone, Debug)]
pub struct HttpRecordClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpRecordClient {
    /// Wraps an already configured reqwest client.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn builder() -> HttpRecordClientBuilder {
        HttpRecordClientBuilder::default()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send<TResp: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<TResp, ClientError> {
        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<TResp>().await?);
        }

        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        Err(ClientError::Server { status, message })
    }
}

#[async_trait]
impl RecordClient for HttpRecordClient {
    async fn fetch_records(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<FetchResponse, ClientError> {
        tracing::debug!(table, "fetching records");
        let request = self
            .client
            .post(self.url(&format!("tables/{table}/fetch")))
            .json(query);
        self.send(request).await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        query: &Query,
    ) -> Result<RecordResponse, ClientError> {
        tracing::debug!(table, id, "fetching record");
        let request = self
            .client
            .post(self.url(&format!("tables/{table}/records/{id}")))
            .json(query);
        self.send(request).await
    }

    async fn create_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<BatchResponse, ClientError> {
        tracing::debug!(table, count = payload.records.len(), "creating records");
        let request = self
            .client
            .post(self.url(&format!("tables/{table}/records")))
            .json(payload);
        self.send(request).await
    }

    async fn update_records(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<BatchResponse, ClientError> {
        tracing::debug!(table, count = payload.records.len(), "updating records");
        let request = self
            .client
            .put(self.url(&format!("tables/{table}/records")))
            .json(payload);
        self.send(request).await
    }

    async fn delete_records(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> Result<BatchResponse, ClientError> {
        tracing::debug!(table, count = payload.record_ids.len(), "deleting records");
        let request = self
            .client
            .delete(self.url(&format!("tables/{table}/records")))
            .json(payload);
        self.send(request).await
    }
}

#[derive(Default, Debug)]
pub struct HttpRecordClientBuilder {
    base_url: String,
    project_id: String,
    public_key: String,
    timeout: Option<Duration>,
}

impl HttpRecordClientBuilder {
    pub fn base_url(mut self, base_url: &str) -> HttpRecordClientBuilder {
        self.base_url = base_url.to_string();
        self
    }

    pub fn credentials(mut self, project_id: &str, public_key: &str) -> HttpRecordClientBuilder {
        self.project_id = project_id.to_string();
        self.public_key = public_key.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> HttpRecordClientBuilder {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<HttpRecordClient, ClientError> {
        if self.base_url.is_empty() {
            return Err(ClientError::Config("base url is required".to_string()));
        }
        reqwest::Url::parse(&self.base_url)
            .map_err(|err| ClientError::Config(format!("invalid base url: {err}")))?;

        let project_id = header::HeaderValue::try_from(self.project_id.as_str())
            .map_err(|err| ClientError::Config(format!("invalid project id: {err}")))?;
        let mut public_key = header::HeaderValue::try_from(self.public_key.as_str())
            .map_err(|err| ClientError::Config(format!("invalid public key: {err}")))?;
        public_key.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(PROJECT_ID_HEADER, project_id);
        headers.insert(PUBLIC_KEY_HEADER, public_key);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(HttpRecordClient::new(client, self.base_url))
    }
}
