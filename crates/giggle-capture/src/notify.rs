//! User-notification seam for the capture surface.

use std::sync::Mutex;

use tracing::info;

/// A desktop notification raised by the capture workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Raises notifications on whatever surface hosts the workflow.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that logs instead of displaying anything.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        info!(
            title = %notification.title,
            message = %notification.message,
            "User notification"
        );
    }
}

/// Notifier that records every notification for test assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    log: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications raised so far, in order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.log.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.log.lock().unwrap().push(notification);
    }
}
