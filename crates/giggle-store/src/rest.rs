//! HTTP client for the hosted document database.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use giggle_core::{defaults, Document, DocumentStore, Error, Filter, OrderBy, Result};

/// Environment variable holding the store's base URL.
pub const ENV_STORE_URL: &str = "GIGGLE_STORE_URL";

/// Environment variable holding the store's API key.
pub const ENV_STORE_API_KEY: &str = "GIGGLE_STORE_API_KEY";

/// Environment variable overriding the request timeout in seconds.
pub const ENV_STORE_TIMEOUT: &str = "GIGGLE_STORE_TIMEOUT";

/// Configuration for the hosted document-store client.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the store's JSON API (e.g. `https://db.example.com/v1`).
    pub base_url: String,
    /// Bearer token for authentication.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_seconds: defaults::STORE_TIMEOUT_SECS,
        }
    }

    /// Read configuration from the environment.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `GIGGLE_STORE_URL` | required | Base URL of the store API |
    /// | `GIGGLE_STORE_API_KEY` | none | Bearer token |
    /// | `GIGGLE_STORE_TIMEOUT` | `30` | Request timeout in seconds |
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(ENV_STORE_URL)
            .map_err(|_| Error::Config(format!("{} is not set", ENV_STORE_URL)))?;

        Ok(Self {
            base_url,
            api_key: std::env::var(ENV_STORE_API_KEY).ok(),
            timeout_seconds: std::env::var(ENV_STORE_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::STORE_TIMEOUT_SECS),
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

#[derive(Debug, Serialize)]
struct QueryRequest {
    filters: Vec<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<OrderBy>,
}

#[derive(Debug, Deserialize)]
struct DocumentsResponse {
    documents: Vec<Document>,
}

#[derive(Debug, Serialize)]
struct WriteRequest {
    fields: JsonValue,
}

#[derive(Debug, Serialize)]
struct BatchWriteRequest {
    documents: Vec<WriteRequest>,
}

/// Error response from the store API.
#[derive(Debug, Deserialize)]
struct StoreErrorResponse {
    error: StoreError,
}

#[derive(Debug, Deserialize)]
struct StoreError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Hosted document-store client.
pub struct RestDocumentStore {
    client: Client,
    config: RestConfig,
}

impl RestDocumentStore {
    /// Create a new client with the given configuration.
    pub fn new(config: RestConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(base_url = %config.base_url, "Initializing document store client");

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(RestConfig::from_env()?)
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut req = self.client.request(method, &url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req.header("Content-Type", "application/json")
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = match response.json::<StoreErrorResponse>().await {
            Ok(body) => match body.error.code {
                Some(code) => format!("{} ({})", body.error.message, code),
                None => body.error.message,
            },
            Err(_) => "Unknown error".to_string(),
        };
        Err(Error::Store(format!("{}: {}", status, message)))
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn query(
        &self,
        collection: &str,
        filters: Vec<Filter>,
        order_by: Option<OrderBy>,
    ) -> Result<Vec<Document>> {
        debug!(collection, filter_count = filters.len(), "Querying collection");

        let response = self
            .request(Method::POST, &format!("/collections/{}/query", collection))
            .json(&QueryRequest { filters, order_by })
            .send()
            .await?;

        let body: DocumentsResponse = Self::check(response).await?.json().await?;
        debug!(collection, result_count = body.documents.len(), "Query complete");
        Ok(body.documents)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let response = self
            .request(
                Method::GET,
                &format!("/collections/{}/documents/{}", collection, id),
            )
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let doc: Document = Self::check(response).await?.json().await?;
        Ok(Some(doc))
    }

    async fn insert(&self, collection: &str, fields: JsonValue) -> Result<Document> {
        let response = self
            .request(
                Method::POST,
                &format!("/collections/{}/documents", collection),
            )
            .json(&WriteRequest { fields })
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn insert_batch(
        &self,
        collection: &str,
        docs: Vec<JsonValue>,
    ) -> Result<Vec<Document>> {
        let response = self
            .request(
                Method::POST,
                &format!("/collections/{}/documents/batch", collection),
            )
            .json(&BatchWriteRequest {
                documents: docs.into_iter().map(|fields| WriteRequest { fields }).collect(),
            })
            .send()
            .await?;

        let body: DocumentsResponse = Self::check(response).await?.json().await?;
        Ok(body.documents)
    }

    async fn patch(&self, collection: &str, id: &str, fields: JsonValue) -> Result<Document> {
        let response = self
            .request(
                Method::PATCH,
                &format!("/collections/{}/documents/{}", collection, id),
            )
            .json(&WriteRequest { fields })
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("{}/{}", collection, id)));
        }

        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let response = self
            .request(
                Method::DELETE,
                &format!("/collections/{}/documents/{}", collection, id),
            )
            .send()
            .await?;

        // Deletes are idempotent: a missing document is not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }

        Self::check(response).await?;
        Ok(())
    }
}
