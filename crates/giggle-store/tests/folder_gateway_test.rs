//! Integration tests for the folder gateway over the in-memory store.

use std::sync::Arc;

use serde_json::json;

use giggle_core::defaults::FOLDERS_COLLECTION;
use giggle_core::{CreateFolderRequest, Error, FolderPatch, FolderRepository};
use giggle_store::{FolderGateway, MemoryDocumentStore};

fn gateway() -> (Arc<MemoryDocumentStore>, FolderGateway) {
    let store = Arc::new(MemoryDocumentStore::new());
    let gateway = FolderGateway::new(store.clone());
    (store, gateway)
}

fn folder_fields(user_id: &str, name: &str, order: i64, system: bool) -> serde_json::Value {
    json!({
        "userId": user_id,
        "name": name,
        "color": "blue",
        "createdAt": "2026-03-14T09:00:00Z",
        "order": order,
        "isArchived": false,
        "isSystemFolder": system
    })
}

#[tokio::test]
async fn test_create_returns_fresh_non_system_folder() {
    let (_, gateway) = gateway();

    let folder = gateway
        .create(CreateFolderRequest {
            user_id: "u1".to_string(),
            name: "Reading".to_string(),
            color: Some("green".to_string()),
            order: 2,
        })
        .await
        .unwrap();

    assert!(!folder.id.is_empty());
    assert!(!folder.is_system_folder);
    assert!(!folder.is_archived);
    assert_eq!(folder.name, "Reading");
    assert_eq!(folder.color.as_deref(), Some("green"));

    // The stored document round-trips through get.
    let fetched = gateway.get(&folder.id).await.unwrap().unwrap();
    assert_eq!(fetched, folder);
}

#[tokio::test]
async fn test_create_defaults_writes_system_folders_in_one_batch() {
    let (store, gateway) = gateway();

    let folders = gateway.create_defaults("u1").await.unwrap();

    assert_eq!(folders.len(), 2);
    assert_eq!(folders[0].name, "Default");
    assert_eq!(folders[0].color.as_deref(), Some("blue"));
    assert_eq!(folders[0].order, 0);
    assert_eq!(folders[1].name, "Important");
    assert_eq!(folders[1].color.as_deref(), Some("orange"));
    assert_eq!(folders[1].order, 1);
    assert!(folders.iter().all(|f| f.is_system_folder));
    assert!(folders.iter().all(|f| f.user_id == "u1"));

    assert_eq!(store.op_count("insert_batch"), 1);
    assert_eq!(store.op_count("insert"), 0);
}

#[tokio::test]
async fn test_list_for_user_orders_and_filters() {
    let (store, gateway) = gateway();
    store.seed(FOLDERS_COLLECTION, "f2", folder_fields("u1", "Second", 5, false));
    store.seed(FOLDERS_COLLECTION, "f1", folder_fields("u1", "First", 0, true));
    store.seed(FOLDERS_COLLECTION, "fx", folder_fields("u2", "Other", 1, false));

    let folders = gateway.list_for_user("u1").await.unwrap();

    let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[tokio::test]
async fn test_list_skips_malformed_documents() {
    let (store, gateway) = gateway();
    store.seed(FOLDERS_COLLECTION, "good", folder_fields("u1", "Default", 0, true));
    // Missing the required name field.
    store.seed(
        FOLDERS_COLLECTION,
        "bad",
        json!({
            "userId": "u1",
            "createdAt": "2026-03-14T09:00:00Z",
            "order": 1,
            "isArchived": false,
            "isSystemFolder": false
        }),
    );

    let folders = gateway.list_for_user("u1").await.unwrap();

    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].id, "good");
}

#[tokio::test]
async fn test_get_malformed_document_is_absent() {
    let (store, gateway) = gateway();
    store.seed(FOLDERS_COLLECTION, "bad", json!({"userId": "u1"}));

    assert_eq!(gateway.get("bad").await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_system_folder_is_rejected_and_unchanged() {
    let (store, gateway) = gateway();
    store.seed(FOLDERS_COLLECTION, "sys", folder_fields("u1", "Default", 0, true));

    let err = gateway.delete("sys").await.unwrap_err();
    assert!(matches!(err, Error::SystemFolder));
    assert_eq!(err.to_string(), "Cannot delete system folders");

    // Still present and unmodified.
    let folder = gateway.get("sys").await.unwrap().unwrap();
    assert_eq!(folder.name, "Default");
    assert!(folder.is_system_folder);
}

#[tokio::test]
async fn test_delete_missing_folder_is_not_found() {
    let (_, gateway) = gateway();
    let err = gateway.delete("nope").await.unwrap_err();
    assert!(matches!(err, Error::FolderNotFound(_)));
}

#[tokio::test]
async fn test_delete_regular_folder() {
    let (store, gateway) = gateway();
    store.seed(FOLDERS_COLLECTION, "f1", folder_fields("u1", "Reading", 2, false));

    gateway.delete("f1").await.unwrap();
    assert_eq!(gateway.get("f1").await.unwrap(), None);
}

#[tokio::test]
async fn test_update_merges_fields() {
    let (store, gateway) = gateway();
    store.seed(FOLDERS_COLLECTION, "f1", folder_fields("u1", "Reading", 2, false));

    let folder = gateway
        .update(
            "f1",
            FolderPatch {
                name: Some("Research".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(folder.name, "Research");
    // Untouched fields survive the merge.
    assert_eq!(folder.order, 2);
    assert_eq!(folder.user_id, "u1");
}

#[tokio::test]
async fn test_update_missing_folder_is_not_found() {
    let (_, gateway) = gateway();
    let err = gateway
        .update("nope", FolderPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::FolderNotFound(_)));
}

#[tokio::test]
async fn test_archive_and_unarchive() {
    let (store, gateway) = gateway();
    store.seed(FOLDERS_COLLECTION, "f1", folder_fields("u1", "Reading", 2, false));

    let folder = gateway.archive("f1").await.unwrap();
    assert!(folder.is_archived);

    let folder = gateway.unarchive("f1").await.unwrap();
    assert!(!folder.is_archived);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let (store, gateway) = gateway();
    store.fail_with("backend unavailable");

    let err = gateway.list_for_user("u1").await.unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}
