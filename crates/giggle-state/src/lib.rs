//! # giggle-state
//!
//! Client-side state layer for giggle-notes: injectable state containers
//! mutated through pure reducers, data-access handles binding the
//! persistence gateways to those containers, and the `Workspace`
//! composition root.
//!
//! The handles follow an optimistic-update pattern: after a remote
//! mutation succeeds the local list is patched synchronously instead of
//! re-fetched, so consumers see the change without a second round trip.

pub mod folders;
pub mod notes;
pub mod store;
pub mod workspace;

pub use folders::Folders;
pub use notes::{NoteScope, Notes};
pub use store::{reduce, Keyed, ListAction, ListState, Store};
pub use workspace::Workspace;
