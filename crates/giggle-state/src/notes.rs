//! Note data-access handle.

use std::sync::Arc;
use std::sync::RwLock;

use giggle_core::{
    CreateNoteRequest, Error, Identity, Note, NotePatch, NoteRepository, Result,
};

use crate::store::{ListAction, ListState, Store};

/// Which slice of the user's notes the handle tracks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NoteScope {
    /// Every note owned by the user.
    #[default]
    All,
    /// Notes in one folder.
    Folder(String),
    /// Pinned notes.
    Pinned,
    /// Archived notes.
    Archived,
}

/// Binds the note repository to a [`Store`], the current session, and a
/// listing scope. Changing the scope triggers a fetch.
#[derive(Clone)]
pub struct Notes {
    repo: Arc<dyn NoteRepository>,
    identity: Arc<dyn Identity>,
    store: Arc<Store<Note>>,
    scope: Arc<RwLock<NoteScope>>,
}

impl Notes {
    pub fn new(repo: Arc<dyn NoteRepository>, identity: Arc<dyn Identity>) -> Self {
        Self {
            repo,
            identity,
            store: Arc::new(Store::new()),
            scope: Arc::new(RwLock::new(NoteScope::All)),
        }
    }

    /// The underlying state container.
    pub fn store(&self) -> &Arc<Store<Note>> {
        &self.store
    }

    /// Clone of the current note list state.
    pub fn snapshot(&self) -> ListState<Note> {
        self.store.snapshot()
    }

    /// The scope currently being tracked.
    pub fn scope(&self) -> NoteScope {
        self.scope.read().unwrap().clone()
    }

    /// Switch to a new scope, fetching when it actually changes.
    pub async fn set_scope(&self, scope: NoteScope) -> Result<()> {
        {
            let mut current = self.scope.write().unwrap();
            if *current == scope {
                return Ok(());
            }
            *current = scope;
        }
        self.refresh().await
    }

    /// Fetch the notes in the current scope. With no session this is a
    /// no-op.
    pub async fn refresh(&self) -> Result<()> {
        let Some(user) = self.identity.current_user() else {
            return Ok(());
        };
        let scope = self.scope();

        self.store.dispatch(ListAction::LoadingStarted);
        let result = match &scope {
            NoteScope::All => self.repo.list_for_user(&user.id).await,
            NoteScope::Folder(folder_id) => {
                self.repo.list_for_folder(folder_id, &user.id).await
            }
            NoteScope::Pinned => self.repo.pinned_for_user(&user.id).await,
            NoteScope::Archived => self.repo.archived_for_user(&user.id).await,
        };

        match result {
            Ok(notes) => {
                self.store.dispatch(ListAction::Loaded(notes));
                Ok(())
            }
            Err(e) => {
                self.store.dispatch(ListAction::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Create a note for the current user and append it locally.
    ///
    /// The request's `user_id` is overwritten with the session's user.
    pub async fn create(&self, mut req: CreateNoteRequest) -> Result<Note> {
        let user = self.identity.current_user().ok_or(Error::NotAuthenticated)?;
        req.user_id = user.id;

        match self.repo.create(req).await {
            Ok(note) => {
                self.store.dispatch(ListAction::Added(note.clone()));
                Ok(note)
            }
            Err(e) => {
                self.store.dispatch(ListAction::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Apply a partial update and replace the local copy.
    pub async fn update(&self, id: &str, patch: NotePatch) -> Result<Note> {
        match self.repo.update(id, patch).await {
            Ok(note) => {
                self.store.dispatch(ListAction::Replaced(note.clone()));
                Ok(note)
            }
            Err(e) => {
                self.store.dispatch(ListAction::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Delete a note and drop it from the local list.
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

    /// Record that a note was viewed. Refreshes `lastAccessedAt` remotely
    /// without touching the local list.
    pub async fn mark_viewed(&self, id: &str) -> Result<()> {
        self.repo.touch_accessed(id).await
    }

    /// Drop all local note state and reset the scope.
    pub fn clear(&self) {
        *self.scope.write().unwrap() = NoteScope::All;
        self.store.dispatch(ListAction::Cleared);
    }
}
