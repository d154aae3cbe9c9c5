//! Note gateway implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::warn;

use giggle_core::defaults::NOTES_COLLECTION;
use giggle_core::{
    CreateNoteRequest, Document, DocumentStore, Error, Filter, Note, NotePatch, NoteRepository,
    OrderBy, Result,
};

/// Gateway over the hosted `notes` collection.
#[derive(Clone)]
pub struct NoteGateway {
    store: Arc<dyn DocumentStore>,
}

impl NoteGateway {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn decode(doc: Document) -> Result<Note> {
        let Document { id, fields } = doc;
        match serde_json::from_value::<Note>(fields) {
            Ok(mut note) => {
                note.id = id;
                Ok(note)
            }
            Err(e) => Err(Error::Decode {
                collection: NOTES_COLLECTION.to_string(),
                id,
                reason: e.to_string(),
            }),
        }
    }

    /// Run a filtered note query and decode the results, skipping
    /// malformed documents.
    async fn query_notes(&self, filters: Vec<Filter>) -> Result<Vec<Note>> {
        let docs = self
            .store
            .query(NOTES_COLLECTION, filters, Some(OrderBy::desc("updatedAt")))
            .await?;

        Ok(docs
            .into_iter()
            .filter_map(|doc| match Self::decode(doc) {
                Ok(note) => Some(note),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed note document");
                    None
                }
            })
            .collect())
    }
}

#[async_trait]
impl NoteRepository for NoteGateway {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Note>> {
        self.query_notes(vec![Filter::eq("userId", user_id)]).await
    }

    async fn list_for_folder(&self, folder_id: &str, user_id: &str) -> Result<Vec<Note>> {
        self.query_notes(vec![
            Filter::eq("userId", user_id),
            Filter::eq("folderId", folder_id),
        ])
        .await
    }

    async fn pinned_for_user(&self, user_id: &str) -> Result<Vec<Note>> {
        self.query_notes(vec![
            Filter::eq("userId", user_id),
            Filter::eq("isPinned", true),
        ])
        .await
    }

    async fn archived_for_user(&self, user_id: &str) -> Result<Vec<Note>> {
        self.query_notes(vec![
            Filter::eq("userId", user_id),
            Filter::eq("isArchived", true),
        ])
        .await
    }

    async fn get(&self, id: &str) -> Result<Option<Note>> {
        let Some(doc) = self.store.get(NOTES_COLLECTION, id).await? else {
            return Ok(None);
        };

        match Self::decode(doc) {
            Ok(note) => Ok(Some(note)),
            Err(e) => {
                warn!(error = %e, "Malformed note document, treating as absent");
                Ok(None)
            }
        }
    }

    async fn create(&self, req: CreateNoteRequest) -> Result<Note> {
        let now = Utc::now();
        let mut note = Note {
            id: String::new(),
            user_id: req.user_id,
            folder_id: req.folder_id,
            title: req.title,
            content: req.content.unwrap_or_default(),
            tags: req.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            last_accessed_at: now,
            is_archived: req.is_archived,
            is_pinned: req.is_pinned,
            url: req.url,
        };

        let doc = self
            .store
            .insert(NOTES_COLLECTION, serde_json::to_value(&note)?)
            .await?;
        note.id = doc.id;
        Ok(note)
    }

    async fn update(&self, id: &str, patch: NotePatch) -> Result<Note> {
        let mut fields = serde_json::to_value(&patch)?;
        // Every update refreshes updatedAt.
        fields["updatedAt"] = json!(Utc::now());

        let doc = self
            .store
            .patch(NOTES_COLLECTION, id, fields)
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => Error::NoteNotFound(id.to_string()),
                other => other,
            })?;

        Self::decode(doc)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(NOTES_COLLECTION, id).await
    }

    async fn touch_accessed(&self, id: &str) -> Result<()> {
        self.store
            .patch(NOTES_COLLECTION, id, json!({ "lastAccessedAt": Utc::now() }))
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => Error::NoteNotFound(id.to_string()),
                other => other,
            })?;
        Ok(())
    }
}
