//! Folder gateway implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

use giggle_core::defaults::{
    DEFAULT_FOLDER_COLOR, DEFAULT_FOLDER_NAME, FOLDERS_COLLECTION, IMPORTANT_FOLDER_COLOR,
    IMPORTANT_FOLDER_NAME,
};
use giggle_core::{
    CreateFolderRequest, Document, DocumentStore, Error, Filter, Folder, FolderPatch,
    FolderRepository, OrderBy, Result,
};

/// Gateway over the hosted `folders` collection.
///
/// Every read validates the retrieved document against the `Folder`
/// schema; malformed documents are logged and skipped rather than
/// surfaced to the caller.
#[derive(Clone)]
pub struct FolderGateway {
    store: Arc<dyn DocumentStore>,
}

impl FolderGateway {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn decode(doc: Document) -> Result<Folder> {
        let Document { id, fields } = doc;
        match serde_json::from_value::<Folder>(fields) {
            Ok(mut folder) => {
                folder.id = id;
                Ok(folder)
            }
            Err(e) => Err(Error::Decode {
                collection: FOLDERS_COLLECTION.to_string(),
                id,
                reason: e.to_string(),
            }),
        }
    }

    fn system_folder(user_id: &str, name: &str, color: &str, order: i64) -> Folder {
        Folder {
            id: String::new(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            color: Some(color.to_string()),
            created_at: Utc::now(),
            order,
            is_archived: false,
            is_system_folder: true,
        }
    }
}

#[async_trait]
impl FolderRepository for FolderGateway {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Folder>> {
        let docs = self
            .store
            .query(
                FOLDERS_COLLECTION,
                vec![Filter::eq("userId", user_id)],
                Some(OrderBy::asc("order")),
            )
            .await?;

        Ok(docs
            .into_iter()
            .filter_map(|doc| match Self::decode(doc) {
                Ok(folder) => Some(folder),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed folder document");
                    None
                }
            })
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Folder>> {
        let Some(doc) = self.store.get(FOLDERS_COLLECTION, id).await? else {
            return Ok(None);
        };

        match Self::decode(doc) {
            Ok(folder) => Ok(Some(folder)),
            Err(e) => {
                warn!(error = %e, "Malformed folder document, treating as absent");
                Ok(None)
            }
        }
    }

    async fn create(&self, req: CreateFolderRequest) -> Result<Folder> {
        let mut folder = Folder {
            id: String::new(),
            user_id: req.user_id,
            name: req.name,
            color: req.color,
            created_at: Utc::now(),
            order: req.order,
            is_archived: false,
            is_system_folder: false,
        };

        let doc = self
            .store
            .insert(FOLDERS_COLLECTION, serde_json::to_value(&folder)?)
            .await?;
        folder.id = doc.id;
        Ok(folder)
    }

    async fn create_defaults(&self, user_id: &str) -> Result<Vec<Folder>> {
        let mut folders = vec![
            Self::system_folder(user_id, DEFAULT_FOLDER_NAME, DEFAULT_FOLDER_COLOR, 0),
            Self::system_folder(user_id, IMPORTANT_FOLDER_NAME, IMPORTANT_FOLDER_COLOR, 1),
        ];

        let fields = folders
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let docs = self.store.insert_batch(FOLDERS_COLLECTION, fields).await?;

        for (folder, doc) in folders.iter_mut().zip(docs) {
            folder.id = doc.id;
        }
        Ok(folders)
    }

    async fn update(&self, id: &str, patch: FolderPatch) -> Result<Folder> {
        let doc = self
            .store
            .patch(FOLDERS_COLLECTION, id, serde_json::to_value(&patch)?)
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => Error::FolderNotFound(id.to_string()),
                other => other,
            })?;

        Self::decode(doc)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let folder = self
            .get(id)
            .await?
            .ok_or_else(|| Error::FolderNotFound(id.to_string()))?;

        if folder.is_system_folder {
            return Err(Error::SystemFolder);
        }

        self.store.delete(FOLDERS_COLLECTION, id).await
    }
}
