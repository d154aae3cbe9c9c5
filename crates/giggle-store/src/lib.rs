//! # giggle-store
//!
//! Hosted document-store clients and persistence gateways for giggle-notes.
//!
//! This crate provides:
//! - An HTTP client for the hosted document database
//! - An in-memory store with the same query semantics, for tests and
//!   offline use
//! - Folder and note gateways with schema validation at the read boundary
//! - An in-memory identity provider stand-in
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use giggle_store::{Gateways, RestDocumentStore};
//! use giggle_core::{CreateNoteRequest, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateways = Gateways::new(Arc::new(RestDocumentStore::from_env()?));
//!
//!     let note = gateways
//!         .notes
//!         .create(CreateNoteRequest::new("u1", "f1", "Hello"))
//!         .await?;
//!
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```

pub mod folders;
pub mod identity;
pub mod memory;
pub mod notes;
pub mod rest;

use std::sync::Arc;

use giggle_core::{DocumentStore, Result};

pub use folders::FolderGateway;
pub use identity::MemoryIdentity;
pub use memory::{MemoryDocumentStore, StoreOp};
pub use notes::NoteGateway;
pub use rest::{RestConfig, RestDocumentStore};

/// Combined gateway context over one document store.
#[derive(Clone)]
pub struct Gateways {
    /// The underlying document store.
    pub store: Arc<dyn DocumentStore>,
    /// Folder gateway.
    pub folders: FolderGateway,
    /// Note gateway.
    pub notes: NoteGateway,
}

impl Gateways {
    /// Create gateways over the given document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            folders: FolderGateway::new(store.clone()),
            notes: NoteGateway::new(store.clone()),
            store,
        }
    }

    /// Create gateways over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryDocumentStore::new()))
    }

    /// Create gateways over the hosted store configured from the
    /// environment.
    pub fn connect_env() -> Result<Self> {
        Ok(Self::new(Arc::new(RestDocumentStore::from_env()?)))
    }
}
