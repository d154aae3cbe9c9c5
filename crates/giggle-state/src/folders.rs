//! Folder data-access handle.

use std::sync::Arc;

use giggle_core::{
    CreateFolderRequest, Error, Folder, FolderPatch, FolderRepository, Identity, Result,
};

use crate::store::{ListAction, ListState, Store};

/// Binds the folder repository to a [`Store`] and the current session.
///
/// Remote mutations patch the local list synchronously on success instead
/// of re-fetching. Gateway errors propagate to the caller and are also
/// recorded in the store's error state.
#[derive(Clone)]
pub struct Folders {
    repo: Arc<dyn FolderRepository>,
    identity: Arc<dyn Identity>,
    store: Arc<Store<Folder>>,
}

impl Folders {
    pub fn new(repo: Arc<dyn FolderRepository>, identity: Arc<dyn Identity>) -> Self {
        Self {
            repo,
            identity,
            store: Arc::new(Store::new()),
        }
    }

    /// The underlying state container.
    pub fn store(&self) -> &Arc<Store<Folder>> {
        &self.store
    }

    /// Clone of the current folder list state.
    pub fn snapshot(&self) -> ListState<Folder> {
        self.store.snapshot()
    }

    /// Fetch the current user's folders. With no session this is a no-op.
    pub async fn refresh(&self) -> Result<()> {
        let Some(user) = self.identity.current_user() else {
            return Ok(());
        };

        self.store.dispatch(ListAction::LoadingStarted);
        match self.repo.list_for_user(&user.id).await {
            Ok(folders) => {
                self.store.dispatch(ListAction::Loaded(folders));
                Ok(())
            }
            Err(e) => {
                self.store.dispatch(ListAction::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Create a folder for the current user and append it locally.
    pub async fn create(
        &self,
        name: impl Into<String>,
        color: Option<String>,
        order: i64,
    ) -> Result<Folder> {
        let user = self.identity.current_user().ok_or(Error::NotAuthenticated)?;

        match self
            .repo
            .create(CreateFolderRequest {
                user_id: user.id,
                name: name.into(),
                color,
                order,
            })
            .await
        {
            Ok(folder) => {
                self.store.dispatch(ListAction::Added(folder.clone()));
                Ok(folder)
            }
            Err(e) => {
                self.store.dispatch(ListAction::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Apply a partial update and replace the local copy.
    pub async fn update(&self, id: &str, patch: FolderPatch) -> Result<Folder> {
        match self.repo.update(id, patch).await {
            Ok(folder) => {
                self.store.dispatch(ListAction::Replaced(folder.clone()));
                Ok(folder)
            }
            Err(e) => {
                self.store.dispatch(ListAction::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Delete a folder and drop it from the local list.
    pub async fn delete(&self, id: &str) -> Result<()> {
        match self.repo.delete(id).await {
            Ok(()) => {
                self.store.dispatch(ListAction::Removed(id.to_string()));
                Ok(())
            }
            Err(e) => {
                self.store.dispatch(ListAction::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Drop all local folder state.
    pub fn clear(&self) {
        self.store.dispatch(ListAction::Cleared);
    }
}
