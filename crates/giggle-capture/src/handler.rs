//! The background capture workflow.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use giggle_core::defaults::{FALLBACK_NOTE_TITLE, SUMMARY_TITLE_PREFIX};
use giggle_core::{
    CreateNoteRequest, Error, FolderRepository, Identity, Note, NoteRepository, Result, User,
};

use crate::menu::{menu_items, MenuAction, MenuItem};
use crate::notify::{Notification, Notifier};
use crate::summarize::Summarizer;

/// Notification raised after a successful capture.
const NOTIFY_SAVED_TITLE: &str = "Note Saved";

/// Notification raised when a capture fails.
const NOTIFY_ERROR_TITLE: &str = "Error";
const NOTIFY_ERROR_MESSAGE: &str = "Failed to save note. Please try again.";

/// Notification raised when summarization fails and the original text is
/// saved instead.
const NOTIFY_SUMMARY_FAILED_TITLE: &str = "Summarization Failed";
const NOTIFY_SUMMARY_FAILED_MESSAGE: &str = "Saving the original selection instead.";

/// The page selection a context-menu click carries.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Selected text.
    pub text: String,
    /// Title of the page the selection came from.
    pub page_title: Option<String>,
    /// URL of the page the selection came from.
    pub page_url: Option<String>,
}

impl Selection {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page_title: None,
            page_url: None,
        }
    }

    pub fn with_page(
        mut self,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.page_title = Some(title.into());
        self.page_url = Some(url.into());
        self
    }
}

/// Where the capture workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePhase {
    #[default]
    Idle,
    AwaitingSummary,
    Saving,
}

/// What a handled context-menu click resulted in.
#[derive(Debug)]
pub enum CaptureOutcome {
    /// A note was created.
    Saved { note: Note, summarized: bool },
    /// No current user; the surface should open its login UI.
    AuthRequired,
    /// The selection was empty; nothing to do.
    Ignored,
    /// The capture failed. A failure notification was already raised.
    Failed(String),
}

/// Handles context-menu clicks: folder lookup, optional summarization,
/// note creation, and user notification.
///
/// Failures never escape [`CaptureHandler::handle`]; every path returns
/// the workflow to idle.
pub struct CaptureHandler {
    folders: Arc<dyn FolderRepository>,
    notes: Arc<dyn NoteRepository>,
    identity: Arc<dyn Identity>,
    notifier: Arc<dyn Notifier>,
    summarizer: Option<Arc<dyn Summarizer>>,
    phase: Mutex<CapturePhase>,
}

impl CaptureHandler {
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        notes: Arc<dyn NoteRepository>,
        identity: Arc<dyn Identity>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            folders,
            notes,
            identity,
            notifier,
            summarizer: None,
            phase: Mutex::new(CapturePhase::Idle),
        }
    }

    /// Enable summarization through the given backend.
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// The workflow's current phase.
    pub fn phase(&self) -> CapturePhase {
        *self.phase.lock().unwrap()
    }

    /// The menu entries this handler supports.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        menu_items(self.summarizer.is_some())
    }

    /// Handle a context-menu click on a page selection.
    pub async fn handle(&self, action: MenuAction, selection: Selection) -> CaptureOutcome {
        if selection.text.trim().is_empty() {
            return CaptureOutcome::Ignored;
        }

        let Some(user) = self.identity.current_user() else {
            return CaptureOutcome::AuthRequired;
        };

        let outcome = match self.try_capture(&user, action, &selection).await {
            Ok((note, summarized)) => {
                info!(
                    note_id = %note.id,
                    folder = action.folder_name(),
                    summarized,
                    "Selection captured"
                );
                self.notifier.notify(Notification::new(
                    NOTIFY_SAVED_TITLE,
                    format!("Text saved to {} folder", action.folder_name()),
                ));
                CaptureOutcome::Saved { note, summarized }
            }
            Err(e) => {
                warn!(error = %e, "Capture failed");
                self.notifier
                    .notify(Notification::new(NOTIFY_ERROR_TITLE, NOTIFY_ERROR_MESSAGE));
                CaptureOutcome::Failed(e.to_string())
            }
        };

        self.set_phase(CapturePhase::Idle);
        outcome
    }

    async fn try_capture(
        &self,
        user: &User,
        action: MenuAction,
        selection: &Selection,
    ) -> Result<(Note, bool)> {
        let folders = self.folders.list_for_user(&user.id).await?;
        let target = folders
            .into_iter()
            .find(|f| f.name == action.folder_name())
            .ok_or_else(|| Error::FolderNotFound(action.folder_name().to_string()))?;

        let mut content = selection.text.clone();
        let mut summarized = false;

        if action.wants_summary() {
            if let Some(summarizer) = &self.summarizer {
                self.set_phase(CapturePhase::AwaitingSummary);
                match summarizer.summarize(&content).await {
                    Ok(summary) => {
                        content = summary;
                        summarized = true;
                    }
                    Err(e) => {
                        // Summarization failure is non-fatal: save the
                        // original selection.
                        warn!(error = %e, "Summarization failed, saving original text");
                        self.notifier.notify(Notification::new(
                            NOTIFY_SUMMARY_FAILED_TITLE,
                            NOTIFY_SUMMARY_FAILED_MESSAGE,
                        ));
                    }
                }
            }
        }

        self.set_phase(CapturePhase::Saving);

        let page_title = selection
            .page_title
            .clone()
            .unwrap_or_else(|| FALLBACK_NOTE_TITLE.to_string());
        let title = if summarized {
            format!("{}{}", SUMMARY_TITLE_PREFIX, page_title)
        } else {
            page_title
        };

        let note = self
            .notes
            .create(CreateNoteRequest {
                user_id: user.id.clone(),
                folder_id: target.id,
                title,
                content: Some(content),
                tags: Some(Vec::new()),
                is_pinned: false,
                is_archived: false,
                url: selection.page_url.clone(),
            })
            .await?;

        Ok((note, summarized))
    }

    fn set_phase(&self, phase: CapturePhase) {
        *self.phase.lock().unwrap() = phase;
    }
}
