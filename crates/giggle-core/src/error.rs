//! Error types for giggle-notes.

use thiserror::Error;

/// Result type alias using giggle-notes' Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for giggle-notes operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Hosted document store rejected or failed an operation.
    #[error("Store error: {0}")]
    Store(String),

    /// HTTP/network request failed.
    #[error("Request error: {0}")]
    Request(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Folder not found
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Attempted to delete a system folder.
    #[error("Cannot delete system folders")]
    SystemFolder,

    /// A retrieved document did not match the expected schema.
    #[error("Malformed {collection} document {id}: {reason}")]
    Decode {
        collection: String,
        id: String,
        reason: String,
    },

    /// No current user for an operation that requires one.
    #[error("User not authenticated")]
    NotAuthenticated,

    /// Identity provider failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Summarization endpoint failure.
    #[error("Summarization error: {0}")]
    Summarize(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

/// Identity provider errors, keyed by provider error code.
///
/// Display strings are the user-facing messages surfaced by login/signup
/// forms, so callers can show `err.to_string()` directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No account found with this email address.")]
    UserNotFound,

    #[error("Incorrect password. Please try again.")]
    WrongPassword,

    #[error("An account with this email already exists.")]
    EmailAlreadyInUse,

    #[error("Password is too weak. Please choose a stronger password.")]
    WeakPassword,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Too many failed attempts. Please try again later.")]
    TooManyRequests,

    #[error("Network error. Please check your internet connection.")]
    NetworkFailed,

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_store() {
        let err = Error::Store("write rejected".to_string());
        assert_eq!(err.to_string(), "Store error: write rejected");
    }

    #[test]
    fn test_error_display_folder_not_found() {
        let err = Error::FolderNotFound("abc123".to_string());
        assert_eq!(err.to_string(), "Folder not found: abc123");
    }

    #[test]
    fn test_error_display_system_folder() {
        let err = Error::SystemFolder;
        assert_eq!(err.to_string(), "Cannot delete system folders");
    }

    #[test]
    fn test_error_display_decode() {
        let err = Error::Decode {
            collection: "notes".to_string(),
            id: "n1".to_string(),
            reason: "missing field `title`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed notes document n1: missing field `title`"
        );
    }

    #[test]
    fn test_error_display_not_authenticated() {
        assert_eq!(
            Error::NotAuthenticated.to_string(),
            "User not authenticated"
        );
    }

    #[test]
    fn test_auth_error_messages_are_user_facing() {
        assert_eq!(
            AuthError::UserNotFound.to_string(),
            "No account found with this email address."
        );
        assert_eq!(
            AuthError::WrongPassword.to_string(),
            "Incorrect password. Please try again."
        );
        assert_eq!(
            AuthError::EmailAlreadyInUse.to_string(),
            "An account with this email already exists."
        );
        assert_eq!(
            AuthError::NetworkFailed.to_string(),
            "Network error. Please check your internet connection."
        );
    }

    #[test]
    fn test_auth_error_is_transparent() {
        let err: Error = AuthError::InvalidEmail.into();
        assert_eq!(err.to_string(), "Please enter a valid email address.");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().starts_with("Serialization error:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
