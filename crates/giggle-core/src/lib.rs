//! # giggle-core
//!
//! Core types, traits, and abstractions for the giggle-notes library stack.
//!
//! This crate provides the foundational data structures and trait
//! definitions that the other giggle-notes crates depend on.

pub mod defaults;
pub mod document;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use document::{Direction, Document, DocumentStore, Filter, FilterOp, OrderBy};
pub use error::{AuthError, Error, Result};
pub use models::*;
pub use traits::*;
