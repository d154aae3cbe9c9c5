//! In-memory document store for tests and offline use.
//!
//! Implements the same query semantics as the hosted store client:
//! equality filters, a single order-by with timestamp-aware comparison,
//! merge patches, and idempotent deletes. Every operation is recorded in
//! an op log so tests can assert on traffic, and a failure message can be
//! injected to exercise error paths.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use giggle_core::{Direction, Document, DocumentStore, Error, Filter, OrderBy, Result};

/// A recorded store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOp {
    pub op: &'static str,
    pub collection: String,
}

/// HashMap-backed document store.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, BTreeMap<String, JsonValue>>>,
    op_log: Mutex<Vec<StoreOp>>,
    failure: Mutex<Option<String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document under a caller-chosen id, bypassing the op log.
    ///
    /// Lets tests seed fixtures with fixed ids, fixed timestamps, or
    /// deliberately malformed field maps.
    pub fn seed(&self, collection: &str, id: &str, fields: JsonValue) {
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
    }

    /// Make every subsequent operation fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(message.into());
    }

    /// Clear an injected failure.
    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// All operations recorded so far.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.op_log.lock().unwrap().clone()
    }

    /// Number of recorded operations with the given name.
    pub fn op_count(&self, op: &str) -> usize {
        self.op_log.lock().unwrap().iter().filter(|o| o.op == op).count()
    }

    fn record(&self, op: &'static str, collection: &str) -> Result<()> {
        self.op_log.lock().unwrap().push(StoreOp {
            op,
            collection: collection.to_string(),
        });
        if let Some(msg) = self.failure.lock().unwrap().clone() {
            return Err(Error::Store(msg));
        }
        Ok(())
    }
}

/// Order two JSON field values the way the hosted store does.
///
/// Numbers compare numerically, strings chronologically when both parse
/// as RFC 3339 timestamps and lexicographically otherwise. Mixed types
/// fall back to their serialized form.
fn compare_values(a: &JsonValue, b: &JsonValue) -> Ordering {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (JsonValue::String(x), JsonValue::String(y)) => {
            let tx = x.parse::<DateTime<Utc>>();
            let ty = y.parse::<DateTime<Utc>>();
            match (tx, ty) {
                (Ok(tx), Ok(ty)) => tx.cmp(&ty),
                _ => x.cmp(y),
            }
        }
        (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn matches(fields: &JsonValue, filters: &[Filter]) -> bool {
    filters.iter().all(|f| fields.get(&f.field) == Some(&f.value))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query(
        &self,
        collection: &str,
        filters: Vec<Filter>,
        order_by: Option<OrderBy>,
    ) -> Result<Vec<Document>> {
        self.record("query", collection)?;

        let collections = self.collections.lock().unwrap();
        let mut docs: Vec<Document> = collections
            .get(collection)
            .into_iter()
            .flat_map(|docs| docs.iter())
            .filter(|(_, fields)| matches(fields, &filters))
            .map(|(id, fields)| Document {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect();

        if let Some(order) = order_by {
            docs.sort_by(|a, b| {
                let av = a.fields.get(&order.field).unwrap_or(&JsonValue::Null);
                let bv = b.fields.get(&order.field).unwrap_or(&JsonValue::Null);
                let ord = compare_values(av, bv);
                match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.record("get", collection)?;

        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn insert(&self, collection: &str, fields: JsonValue) -> Result<Document> {
        self.record("insert", collection)?;

        let id = Uuid::now_v7().to_string();
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields.clone());
        Ok(Document { id, fields })
    }

    async fn insert_batch(
        &self,
        collection: &str,
        docs: Vec<JsonValue>,
    ) -> Result<Vec<Document>> {
        self.record("insert_batch", collection)?;

        let mut collections = self.collections.lock().unwrap();
        let entry = collections.entry(collection.to_string()).or_default();
        Ok(docs
            .into_iter()
            .map(|fields| {
                let id = Uuid::now_v7().to_string();
                entry.insert(id.clone(), fields.clone());
                Document { id, fields }
            })
            .collect())
    }

    async fn patch(&self, collection: &str, id: &str, fields: JsonValue) -> Result<Document> {
        self.record("patch", collection)?;

        let mut collections = self.collections.lock().unwrap();
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| Error::NotFound(format!("{}/{}", collection, id)))?;

        if let (Some(target), Some(patch)) = (existing.as_object_mut(), fields.as_object()) {
            for (key, value) in patch {
                target.insert(key.clone(), value.clone());
            }
        }

        Ok(Document {
            id: id.to_string(),
            fields: existing.clone(),
        })
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.record("delete", collection)?;

        let mut collections = self.collections.lock().unwrap();
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}
