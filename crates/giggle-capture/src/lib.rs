//! # giggle-capture
//!
//! The background capture workflow for giggle-notes: context-menu
//! actions, the capture handler state machine, the chat-completion
//! summarization client, and the notification seam.
//!
//! The surface hosting this crate (a browser extension background page,
//! a CLI, a test) registers the menu entries from
//! [`CaptureHandler::menu_items`], forwards clicks to
//! [`CaptureHandler::handle`], and displays the notifications raised
//! through its [`Notifier`].

pub mod handler;
pub mod menu;
pub mod notify;
pub mod summarize;

pub use handler::{CaptureHandler, CaptureOutcome, CapturePhase, Selection};
pub use menu::{menu_items, MenuAction, MenuItem};
pub use notify::{LogNotifier, Notification, Notifier, RecordingNotifier};
pub use summarize::{ChatSummarizer, MockSummarizer, SummaryConfig, Summarizer};
