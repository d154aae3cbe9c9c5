//! End-to-end tests for the capture workflow over the in-memory stack.

use std::sync::Arc;

use giggle_capture::{
    CaptureHandler, CaptureOutcome, CapturePhase, MenuAction, MockSummarizer, RecordingNotifier,
    Selection,
};
use giggle_core::{FolderRepository, Identity, NoteRepository, User};
use giggle_store::{FolderGateway, MemoryDocumentStore, MemoryIdentity, NoteGateway};

fn user() -> User {
    User {
        id: "u1".to_string(),
        email: "ada@example.com".to_string(),
        display_name: None,
    }
}

struct Fixture {
    store: Arc<MemoryDocumentStore>,
    folders: Arc<FolderGateway>,
    notes: Arc<NoteGateway>,
    identity: Arc<MemoryIdentity>,
    notifier: Arc<RecordingNotifier>,
}

impl Fixture {
    async fn signed_in() -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let folders = Arc::new(FolderGateway::new(store.clone()));
        let notes = Arc::new(NoteGateway::new(store.clone()));
        folders.create_defaults("u1").await.unwrap();

        Self {
            store,
            folders,
            notes,
            identity: Arc::new(MemoryIdentity::signed_in(user())),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    fn handler(&self) -> CaptureHandler {
        CaptureHandler::new(
            self.folders.clone(),
            self.notes.clone(),
            self.identity.clone(),
            self.notifier.clone(),
        )
    }

    async fn default_folder_id(&self) -> String {
        self.folders
            .list_for_user("u1")
            .await
            .unwrap()
            .into_iter()
            .find(|f| f.name == "Default")
            .unwrap()
            .id
    }
}

#[tokio::test]
async fn test_save_selection_to_default_folder() {
    let fx = Fixture::signed_in().await;
    let handler = fx.handler();

    let outcome = handler
        .handle(
            MenuAction::SaveToDefault,
            Selection::new("Hello world").with_page("Example Page", "https://example.com/post"),
        )
        .await;

    let CaptureOutcome::Saved { note, summarized } = outcome else {
        panic!("expected a saved note");
    };
    assert!(!summarized);
    assert_eq!(note.content, "Hello world");
    assert_eq!(note.folder_id, fx.default_folder_id().await);
    assert!(note.tags.is_empty());
    assert_eq!(note.title, "Example Page");
    assert_eq!(note.url.as_deref(), Some("https://example.com/post"));

    let titles: Vec<String> = fx
        .notifier
        .notifications()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["Note Saved"]);
    assert_eq!(
        fx.notifier.notifications()[0].message,
        "Text saved to Default folder"
    );
    assert_eq!(handler.phase(), CapturePhase::Idle);
}

#[tokio::test]
async fn test_save_to_important_folder() {
    let fx = Fixture::signed_in().await;
    let handler = fx.handler();

    let outcome = handler
        .handle(MenuAction::SaveToImportant, Selection::new("Remember this"))
        .await;

    let CaptureOutcome::Saved { note, .. } = outcome else {
        panic!("expected a saved note");
    };
    let important = fx
        .folders
        .list_for_user("u1")
        .await
        .unwrap()
        .into_iter()
        .find(|f| f.name == "Important")
        .unwrap();
    assert_eq!(note.folder_id, important.id);
    // No page context: the fallback title applies.
    assert_eq!(note.title, "Saved Note");
}

#[tokio::test]
async fn test_summarize_and_save() {
    let fx = Fixture::signed_in().await;
    let summarizer = Arc::new(MockSummarizer::replying("A tidy summary."));
    let handler = fx.handler().with_summarizer(summarizer.clone());

    let outcome = handler
        .handle(
            MenuAction::SummarizeToDefault,
            Selection::new("A very long article body").with_page("Long Read", "https://example.com"),
        )
        .await;

    let CaptureOutcome::Saved { note, summarized } = outcome else {
        panic!("expected a saved note");
    };
    assert!(summarized);
    assert_eq!(summarizer.calls(), 1);
    // The summary is saved verbatim, with the prefixed title.
    assert_eq!(note.content, "A tidy summary.");
    assert_eq!(note.title, "Summary of: Long Read");

    let titles: Vec<String> = fx
        .notifier
        .notifications()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["Note Saved"]);
}

#[tokio::test]
async fn test_summarization_failure_falls_back_to_original_text() {
    let fx = Fixture::signed_in().await;
    let handler = fx
        .handler()
        .with_summarizer(Arc::new(MockSummarizer::failing("HTTP 500")));

    let outcome = handler
        .handle(
            MenuAction::SummarizeToDefault,
            Selection::new("Hello world").with_page("Example Page", "https://example.com"),
        )
        .await;

    let CaptureOutcome::Saved { note, summarized } = outcome else {
        panic!("expected the original text to be saved");
    };
    assert!(!summarized);
    assert_eq!(note.content, "Hello world");
    assert_eq!(note.title, "Example Page");

    // The failure notice precedes the normal save-success notification.
    let titles: Vec<String> = fx
        .notifier
        .notifications()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["Summarization Failed", "Note Saved"]);
}

#[tokio::test]
async fn test_empty_selection_is_ignored() {
    let fx = Fixture::signed_in().await;
    let handler = fx.handler();
    let inserts_before = fx.store.op_count("insert");

    let outcome = handler.handle(MenuAction::SaveToDefault, Selection::new("   ")).await;

    assert!(matches!(outcome, CaptureOutcome::Ignored));
    assert!(fx.notifier.notifications().is_empty());
    assert_eq!(fx.store.op_count("insert"), inserts_before);
}

#[tokio::test]
async fn test_signed_out_requires_auth() {
    let fx = Fixture::signed_in().await;
    fx.identity.sign_out().await.unwrap();
    let handler = fx.handler();

    let outcome = handler
        .handle(MenuAction::SaveToDefault, Selection::new("Hello world"))
        .await;

    assert!(matches!(outcome, CaptureOutcome::AuthRequired));
    assert!(fx.notifier.notifications().is_empty());
}

#[tokio::test]
async fn test_missing_target_folder_fails_with_notification() {
    let store = Arc::new(MemoryDocumentStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    // No default folders were ever created for this user.
    let handler = CaptureHandler::new(
        Arc::new(FolderGateway::new(store.clone())),
        Arc::new(NoteGateway::new(store)),
        Arc::new(MemoryIdentity::signed_in(user())),
        notifier.clone(),
    );

    let outcome = handler
        .handle(MenuAction::SaveToDefault, Selection::new("Hello world"))
        .await;

    assert!(matches!(outcome, CaptureOutcome::Failed(_)));
    let notifications = notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Error");
    assert_eq!(notifications[0].message, "Failed to save note. Please try again.");
    assert_eq!(handler.phase(), CapturePhase::Idle);
}

#[tokio::test]
async fn test_store_failure_fails_with_notification() {
    let fx = Fixture::signed_in().await;
    let handler = fx.handler();
    fx.store.fail_with("backend unavailable");

    let outcome = handler
        .handle(MenuAction::SaveToDefault, Selection::new("Hello world"))
        .await;

    assert!(matches!(outcome, CaptureOutcome::Failed(_)));
    assert_eq!(fx.notifier.notifications()[0].title, "Error");
}

#[tokio::test]
async fn test_menu_items_reflect_summarizer() {
    let fx = Fixture::signed_in().await;
    assert_eq!(fx.handler().menu_items().len(), 2);

    let with_summary = fx
        .handler()
        .with_summarizer(Arc::new(MockSummarizer::replying("ok")));
    assert_eq!(with_summary.menu_items().len(), 4);
}

#[tokio::test]
async fn test_created_note_is_listed_in_folder() {
    let fx = Fixture::signed_in().await;
    let handler = fx.handler();

    handler
        .handle(MenuAction::SaveToDefault, Selection::new("Hello world"))
        .await;

    let folder_id = fx.default_folder_id().await;
    let notes = fx.notes.list_for_folder(&folder_id, "u1").await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "Hello world");
}
