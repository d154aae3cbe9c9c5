//! Context-menu actions exposed by the capture surface.

use giggle_core::defaults::{DEFAULT_FOLDER_NAME, IMPORTANT_FOLDER_NAME};

/// Stable menu-item id for "Save to Default".
pub const MENU_SAVE_DEFAULT: &str = "saveToDefault";

/// Stable menu-item id for "Save to Important".
pub const MENU_SAVE_IMPORTANT: &str = "saveToImportant";

/// Stable menu-item id for "Summarize & Save to Default".
pub const MENU_SUMMARIZE_DEFAULT: &str = "summarizeToDefault";

/// Stable menu-item id for "Summarize & Save to Important".
pub const MENU_SUMMARIZE_IMPORTANT: &str = "summarizeToImportant";

/// A selection context-menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SaveToDefault,
    SaveToImportant,
    SummarizeToDefault,
    SummarizeToImportant,
}

impl MenuAction {
    /// Parse a clicked menu-item id.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            MENU_SAVE_DEFAULT => Some(Self::SaveToDefault),
            MENU_SAVE_IMPORTANT => Some(Self::SaveToImportant),
            MENU_SUMMARIZE_DEFAULT => Some(Self::SummarizeToDefault),
            MENU_SUMMARIZE_IMPORTANT => Some(Self::SummarizeToImportant),
            _ => None,
        }
    }

    /// The stable menu-item id.
    pub fn id(&self) -> &'static str {
        match self {
            Self::SaveToDefault => MENU_SAVE_DEFAULT,
            Self::SaveToImportant => MENU_SAVE_IMPORTANT,
            Self::SummarizeToDefault => MENU_SUMMARIZE_DEFAULT,
            Self::SummarizeToImportant => MENU_SUMMARIZE_IMPORTANT,
        }
    }

    /// The label shown in the menu.
    pub fn title(&self) -> &'static str {
        match self {
            Self::SaveToDefault => "Save to Default",
            Self::SaveToImportant => "Save to Important",
            Self::SummarizeToDefault => "Summarize & Save to Default",
            Self::SummarizeToImportant => "Summarize & Save to Important",
        }
    }

    /// Name of the system folder this action saves into.
    pub fn folder_name(&self) -> &'static str {
        match self {
            Self::SaveToDefault | Self::SummarizeToDefault => DEFAULT_FOLDER_NAME,
            Self::SaveToImportant | Self::SummarizeToImportant => IMPORTANT_FOLDER_NAME,
        }
    }

    /// Whether the selection should be summarized before saving.
    pub fn wants_summary(&self) -> bool {
        matches!(self, Self::SummarizeToDefault | Self::SummarizeToImportant)
    }
}

/// A menu entry for the surface to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub title: &'static str,
}

/// The menu entries to register. Summarize entries are only present when
/// a summarizer is configured.
pub fn menu_items(summarize_enabled: bool) -> Vec<MenuItem> {
    let mut actions = vec![MenuAction::SaveToDefault, MenuAction::SaveToImportant];
    if summarize_enabled {
        actions.push(MenuAction::SummarizeToDefault);
        actions.push(MenuAction::SummarizeToImportant);
    }

    actions
        .into_iter()
        .map(|a| MenuItem {
            id: a.id(),
            title: a.title(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_roundtrip() {
        for action in [
            MenuAction::SaveToDefault,
            MenuAction::SaveToImportant,
            MenuAction::SummarizeToDefault,
            MenuAction::SummarizeToImportant,
        ] {
            assert_eq!(MenuAction::from_id(action.id()), Some(action));
        }
        assert_eq!(MenuAction::from_id("unknown"), None);
    }

    #[test]
    fn test_folder_targets() {
        assert_eq!(MenuAction::SaveToDefault.folder_name(), "Default");
        assert_eq!(MenuAction::SummarizeToImportant.folder_name(), "Important");
    }

    #[test]
    fn test_summarize_entries_require_summarizer() {
        assert_eq!(menu_items(false).len(), 2);

        let items = menu_items(true);
        assert_eq!(items.len(), 4);
        assert!(items.iter().any(|i| i.id == MENU_SUMMARIZE_DEFAULT));
        assert_eq!(items[0].title, "Save to Default");
    }
}
