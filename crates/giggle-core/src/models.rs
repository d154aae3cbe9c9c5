//! Domain models for giggle-notes.
//!
//! `Folder` and `Note` mirror the documents stored in the hosted database:
//! field keys are camelCase on the wire, and the document id is carried
//! outside the field map (it is assigned by the store, never written).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A signed-in user, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A named grouping of notes owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Document id, assigned by the store. Not part of the field map.
    #[serde(skip)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub order: i64,
    pub is_archived: bool,
    pub is_system_folder: bool,
}

/// A titled, tagged text record owned by a user and placed in one folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Document id, assigned by the store. Not part of the field map.
    #[serde(skip)]
    pub id: String,
    pub user_id: String,
    pub folder_id: String,
    pub title: String,
    /// Free text; absent or null in the stored document decodes as empty.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub is_archived: bool,
    pub is_pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request for creating a new folder.
///
/// Folders created this way are never system folders; the two system
/// defaults are only written by the signup batch.
#[derive(Debug, Clone)]
pub struct CreateFolderRequest {
    pub user_id: String,
    pub name: String,
    pub color: Option<String>,
    pub order: i64,
}

/// Partial update for a folder. Unset fields are left untouched.
///
/// Owner, creation timestamp, and the system-folder flag are not
/// patchable.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

/// Request for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub user_id: String,
    pub folder_id: String,
    pub title: String,
    /// Defaults to empty when not provided.
    pub content: Option<String>,
    /// Defaults to no tags when not provided.
    pub tags: Option<Vec<String>>,
    pub is_pinned: bool,
    pub is_archived: bool,
    pub url: Option<String>,
}

impl CreateNoteRequest {
    /// Create a request with defaults for everything but the required scope.
    pub fn new(
        user_id: impl Into<String>,
        folder_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            folder_id: folder_id.into(),
            title: title.into(),
            content: None,
            tags: None,
            is_pinned: false,
            is_archived: false,
            url: None,
        }
    }
}

/// Partial update for a note. Unset fields are left untouched.
///
/// `updatedAt` is refreshed by the gateway on every update and is not part
/// of the patch surface.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_folder_field_keys_are_camel_case() {
        let folder = Folder {
            id: "f1".to_string(),
            user_id: "u1".to_string(),
            name: "Reading".to_string(),
            color: Some("green".to_string()),
            created_at: timestamp(),
            order: 3,
            is_archived: false,
            is_system_folder: false,
        };

        let json = serde_json::to_value(&folder).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["isSystemFolder"], false);
        assert_eq!(json["order"], 3);
        // Document id lives outside the field map.
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_folder_decodes_without_color() {
        let json = serde_json::json!({
            "userId": "u1",
            "name": "Default",
            "createdAt": "2026-03-14T09:26:53Z",
            "order": 0,
            "isArchived": false,
            "isSystemFolder": true
        });

        let folder: Folder = serde_json::from_value(json).unwrap();
        assert_eq!(folder.id, "");
        assert_eq!(folder.color, None);
        assert!(folder.is_system_folder);
    }

    #[test]
    fn test_folder_missing_name_fails_to_decode() {
        let json = serde_json::json!({
            "userId": "u1",
            "createdAt": "2026-03-14T09:26:53Z",
            "order": 0,
            "isArchived": false,
            "isSystemFolder": false
        });

        assert!(serde_json::from_value::<Folder>(json).is_err());
    }

    #[test]
    fn test_note_missing_title_fails_to_decode() {
        let json = serde_json::json!({
            "userId": "u1",
            "folderId": "f1",
            "content": "body",
            "createdAt": "2026-03-14T09:26:53Z",
            "updatedAt": "2026-03-14T09:26:53Z",
            "lastAccessedAt": "2026-03-14T09:26:53Z",
            "isArchived": false,
            "isPinned": false
        });

        assert!(serde_json::from_value::<Note>(json).is_err());
    }

    #[test]
    fn test_note_null_content_decodes_as_empty() {
        let json = serde_json::json!({
            "userId": "u1",
            "folderId": "f1",
            "title": "Clipped",
            "content": null,
            "createdAt": "2026-03-14T09:26:53Z",
            "updatedAt": "2026-03-14T09:26:53Z",
            "lastAccessedAt": "2026-03-14T09:26:53Z",
            "isArchived": false,
            "isPinned": false
        });

        let note: Note = serde_json::from_value(json).unwrap();
        assert_eq!(note.content, "");
        assert!(note.tags.is_empty());
        assert_eq!(note.url, None);
    }

    #[test]
    fn test_note_roundtrip() {
        let note = Note {
            id: "n1".to_string(),
            user_id: "u1".to_string(),
            folder_id: "f1".to_string(),
            title: "Clipped".to_string(),
            content: "Hello world".to_string(),
            tags: vec!["web".to_string()],
            created_at: timestamp(),
            updated_at: timestamp(),
            last_accessed_at: timestamp(),
            is_archived: false,
            is_pinned: true,
            url: Some("https://example.com/post".to_string()),
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["folderId"], "f1");
        assert_eq!(json["isPinned"], true);

        let decoded: Note = serde_json::from_value(json).unwrap();
        // The id round-trips through the document envelope, not the fields.
        assert_eq!(decoded.id, "");
        assert_eq!(decoded.title, note.title);
        assert_eq!(decoded.updated_at, note.updated_at);
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = NotePatch {
            content: Some("edited".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&patch).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["content"], "edited");
    }

    #[test]
    fn test_empty_folder_patch_is_empty_object() {
        let json = serde_json::to_value(FolderPatch::default()).unwrap();
        assert!(json.as_object().unwrap().is_empty());
    }
}
