//! Centralized default constants for giggle-notes.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! values.

// =============================================================================
// COLLECTIONS
// =============================================================================

/// Hosted collection holding folder documents.
pub const FOLDERS_COLLECTION: &str = "folders";

/// Hosted collection holding note documents.
pub const NOTES_COLLECTION: &str = "notes";

// =============================================================================
// SYSTEM FOLDERS
// =============================================================================

/// Name of the default capture folder created at signup.
pub const DEFAULT_FOLDER_NAME: &str = "Default";

/// Color tag of the default capture folder.
pub const DEFAULT_FOLDER_COLOR: &str = "blue";

/// Name of the important-items folder created at signup.
pub const IMPORTANT_FOLDER_NAME: &str = "Important";

/// Color tag of the important-items folder.
pub const IMPORTANT_FOLDER_COLOR: &str = "orange";

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// Default request timeout for document store calls, in seconds.
pub const STORE_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// SUMMARIZATION
// =============================================================================

/// Default base URL of the chat-completion summarization endpoint.
pub const SUMMARY_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default summarization model slug.
pub const SUMMARY_MODEL: &str = "deepseek/deepseek-r1-0528:free";

/// Default request timeout for summarization calls, in seconds.
pub const SUMMARY_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// STATE
// =============================================================================

/// Capacity of a store's change-notification broadcast channel.
pub const STORE_EVENT_CAPACITY: usize = 64;

// =============================================================================
// CAPTURE
// =============================================================================

/// Note title used when the source page has no title.
pub const FALLBACK_NOTE_TITLE: &str = "Saved Note";

/// Title prefix applied to summarized captures.
pub const SUMMARY_TITLE_PREFIX: &str = "Summary of: ";
