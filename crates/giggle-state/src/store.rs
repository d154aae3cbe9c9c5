//! Injectable state containers with pure reducers.
//!
//! A [`Store`] owns one normalized entity list behind a lock and applies
//! [`ListAction`]s through the pure [`reduce`] function. Mutations are
//! keyed by entity id; subscribers are notified of every change on a
//! broadcast channel.

use std::sync::RwLock;

use tokio::sync::broadcast;

use giggle_core::{defaults, Folder, Note};

/// An entity addressable by its document id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Folder {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Note {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Normalized list of one entity type plus its fetch status.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// State mutation applied through [`reduce`].
#[derive(Debug, Clone)]
pub enum ListAction<T> {
    /// A fetch started.
    LoadingStarted,
    /// A fetch completed; replaces the whole list and clears errors.
    Loaded(Vec<T>),
    /// A created entity is appended.
    Added(T),
    /// An updated entity replaces the item with the same id.
    Replaced(T),
    /// The entity with the given id is removed.
    Removed(String),
    /// An operation failed.
    Failed(String),
    /// Clear the recorded error.
    ErrorCleared,
    /// Drop all state (sign-out).
    Cleared,
}

/// Pure reducer over a [`ListState`].
pub fn reduce<T: Keyed>(state: &mut ListState<T>, action: ListAction<T>) {
    match action {
        ListAction::LoadingStarted => state.loading = true,
        ListAction::Loaded(items) => {
            state.items = items;
            state.loading = false;
            state.error = None;
        }
        ListAction::Added(item) => state.items.push(item),
        ListAction::Replaced(item) => {
            if let Some(slot) = state.items.iter_mut().find(|i| i.key() == item.key()) {
                *slot = item;
            }
        }
        ListAction::Removed(id) => state.items.retain(|i| i.key() != id),
        ListAction::Failed(message) => {
            state.error = Some(message);
            state.loading = false;
        }
        ListAction::ErrorCleared => state.error = None,
        ListAction::Cleared => *state = ListState::default(),
    }
}

/// The injectable state container.
pub struct Store<T> {
    state: RwLock<ListState<T>>,
    changes: broadcast::Sender<()>,
}

impl<T: Keyed + Clone> Store<T> {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(defaults::STORE_EVENT_CAPACITY);
        Self {
            state: RwLock::new(ListState::default()),
            changes,
        }
    }

    /// Apply an action and notify subscribers.
    pub fn dispatch(&self, action: ListAction<T>) {
        reduce(&mut self.state.write().unwrap(), action);
        let _ = self.changes.send(());
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> ListState<T> {
        self.state.read().unwrap().clone()
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }
}

impl<T: Keyed + Clone> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}
