//! Composition root owning the session and both data-access handles.

use std::sync::Arc;

use tracing::info;

use giggle_core::{Error, FolderRepository, Identity, NoteRepository, Result, User};

use crate::folders::Folders;
use crate::notes::Notes;

/// The composition root for a signed-in client.
///
/// Owns the state containers (through the handles) and the identity seam.
/// Session transitions refresh or clear both entity lists.
#[derive(Clone)]
pub struct Workspace {
    pub identity: Arc<dyn Identity>,
    pub folders: Folders,
    pub notes: Notes,
    folder_repo: Arc<dyn FolderRepository>,
    note_repo: Arc<dyn NoteRepository>,
}

impl Workspace {
    pub fn new(
        folder_repo: Arc<dyn FolderRepository>,
        note_repo: Arc<dyn NoteRepository>,
        identity: Arc<dyn Identity>,
    ) -> Self {
        Self {
            folders: Folders::new(folder_repo.clone(), identity.clone()),
            notes: Notes::new(note_repo.clone(), identity.clone()),
            identity,
            folder_repo,
            note_repo,
        }
    }

    /// The currently signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.identity.current_user()
    }

    /// Create an account, seed its system folders, and load its data.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<User> {
        let user = self.identity.sign_up(email, password).await?;
        self.folder_repo.create_defaults(&user.id).await?;
        info!(user_id = %user.id, "Account created with default folders");

        self.refresh_all().await?;
        Ok(user)
    }

    /// Sign in and load the user's data.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let user = self.identity.sign_in(email, password).await?;
        self.refresh_all().await?;
        Ok(user)
    }

    /// Sign in through the provider's Google flow and load the user's data.
    pub async fn sign_in_with_google(&self) -> Result<User> {
        let user = self.identity.sign_in_with_google().await?;
        self.refresh_all().await?;
        Ok(user)
    }

    /// End the session and drop all local state.
    pub async fn sign_out(&self) -> Result<()> {
        self.identity.sign_out().await?;
        self.folders.clear();
        self.notes.clear();
        Ok(())
    }

    /// Fetch folders and notes for the current session.
    pub async fn refresh_all(&self) -> Result<()> {
        self.folders.refresh().await?;
        self.notes.refresh().await
    }

    /// Delete a folder together with the notes inside it.
    ///
    /// The cascade runs here, not in the gateway: the folder's notes are
    /// deleted one by one before the folder itself. System folders are
    /// rejected up front, before any note is touched.
    pub async fn delete_folder_cascading(&self, folder_id: &str) -> Result<()> {
        let user = self.identity.current_user().ok_or(Error::NotAuthenticated)?;

        let folder = self
            .folder_repo
            .get(folder_id)
            .await?
            .ok_or_else(|| Error::FolderNotFound(folder_id.to_string()))?;
        if folder.is_system_folder {
            return Err(Error::SystemFolder);
        }

        let notes = self.note_repo.list_for_folder(folder_id, &user.id).await?;
        for note in notes {
            self.notes.delete(&note.id).await?;
        }
        self.folders.delete(folder_id).await
    }
}
