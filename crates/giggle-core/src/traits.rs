//! Core traits for giggle-notes abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// FOLDER REPOSITORY
// =============================================================================

/// Repository for folder CRUD operations.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// List a user's folders, ordered by `order` ascending.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Folder>>;

    /// Fetch a folder by id.
    async fn get(&self, id: &str) -> Result<Option<Folder>>;

    /// Create a folder. The result is never a system folder.
    async fn create(&self, req: CreateFolderRequest) -> Result<Folder>;

    /// Create the two default system folders for a new user in one batch.
    async fn create_defaults(&self, user_id: &str) -> Result<Vec<Folder>>;

    /// Merge a partial update and return the updated folder.
    async fn update(&self, id: &str, patch: FolderPatch) -> Result<Folder>;

    /// Delete a folder. System folders are rejected.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Mark a folder as archived.
    async fn archive(&self, id: &str) -> Result<Folder> {
        self.update(
            id,
            FolderPatch {
                is_archived: Some(true),
                ..Default::default()
            },
        )
        .await
    }

    /// Clear a folder's archived flag.
    async fn unarchive(&self, id: &str) -> Result<Folder> {
        self.update(
            id,
            FolderPatch {
                is_archived: Some(false),
                ..Default::default()
            },
        )
        .await
    }
}

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Repository for note CRUD operations.
///
/// All listings are ordered by `updatedAt` descending.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List every note owned by a user.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Note>>;

    /// List a user's notes in one folder.
    async fn list_for_folder(&self, folder_id: &str, user_id: &str) -> Result<Vec<Note>>;

    /// List a user's pinned notes.
    async fn pinned_for_user(&self, user_id: &str) -> Result<Vec<Note>>;

    /// List a user's archived notes.
    async fn archived_for_user(&self, user_id: &str) -> Result<Vec<Note>>;

    /// Fetch a note by id.
    async fn get(&self, id: &str) -> Result<Option<Note>>;

    /// Create a note with server-assigned id and timestamps.
    async fn create(&self, req: CreateNoteRequest) -> Result<Note>;

    /// Merge a partial update, refresh `updatedAt`, and return the note.
    async fn update(&self, id: &str, patch: NotePatch) -> Result<Note>;

    /// Delete a note.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Refresh `lastAccessedAt` without touching `updatedAt`.
    async fn touch_accessed(&self, id: &str) -> Result<()>;
}

// =============================================================================
// IDENTITY PROVIDER
// =============================================================================

/// Session-based identity provider seam.
///
/// Login, signup, and federated sign-in are delegated entirely to the
/// hosted provider; this stack only consumes the resulting session.
#[async_trait]
pub trait Identity: Send + Sync {
    /// Create an account and start a session for it.
    async fn sign_up(&self, email: &str, password: &str) -> Result<User>;

    /// Start a session with email/password credentials.
    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    /// Start a session through the provider's Google federation flow.
    async fn sign_in_with_google(&self) -> Result<User>;

    /// End the current session.
    async fn sign_out(&self) -> Result<()>;

    /// The currently signed-in user, if any.
    fn current_user(&self) -> Option<User>;
}
