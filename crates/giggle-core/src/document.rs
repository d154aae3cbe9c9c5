//! Document-store abstraction over the hosted database.
//!
//! The hosted database stores schemaless JSON documents in named
//! collections, queried by equality filters and a single order-by. This
//! module defines the wire-level types and the `DocumentStore` seam that
//! concrete clients implement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;

/// A stored document: the store-assigned id plus the raw field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: JsonValue,
}

/// Comparison operator for a query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Eq,
}

/// A single field filter applied server-side to a collection query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: JsonValue,
}

impl Filter {
    /// Equality filter on `field`.
    pub fn eq(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }
}

/// Sort direction for an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Asc,
    Desc,
}

/// Server-side ordering for a collection query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// Client for the hosted document database.
///
/// Writes follow the hosted store's per-document last-writer-wins
/// semantics; no additional coordination happens at this layer.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a filtered, optionally ordered query against a collection.
    async fn query(
        &self,
        collection: &str,
        filters: Vec<Filter>,
        order_by: Option<OrderBy>,
    ) -> Result<Vec<Document>>;

    /// Fetch a single document by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Insert a document; the store assigns the id.
    async fn insert(&self, collection: &str, fields: JsonValue) -> Result<Document>;

    /// Insert several documents in one batch write.
    async fn insert_batch(
        &self,
        collection: &str,
        docs: Vec<JsonValue>,
    ) -> Result<Vec<Document>>;

    /// Merge fields into an existing document and return the result.
    ///
    /// Fails with not-found when the document does not exist.
    async fn patch(&self, collection: &str, id: &str, fields: JsonValue) -> Result<Document>;

    /// Remove a document.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}
