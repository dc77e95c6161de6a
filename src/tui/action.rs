use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// Everything a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Column selection
    Confirm,
    NextColumn,
    PrevColumn,

    // Table
    Sort,
    ReverseSort,

    // View
    FocusNext,
    FocusPrev,
    ToggleHelp,
    Refresh,

    // Application
    Quit,
    Cancel,
}

impl Action {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move cursor up",
            Action::MoveDown => "Move cursor down",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to first row",
            Action::GoToBottom => "Go to last row",
            Action::Confirm => "Select the column under the cursor",
            Action::NextColumn => "Select the next column",
            Action::PrevColumn => "Select the previous column",
            Action::Sort => "Sort by the next table column",
            Action::ReverseSort => "Reverse sort direction",
            Action::FocusNext => "Focus next panel",
            Action::FocusPrev => "Focus previous panel",
            Action::ToggleHelp => "Toggle help screen",
            Action::Refresh => "Reload the report from disk",
            Action::Quit => "Quit application",
            Action::Cancel => "Close overlay",
        }
    }

    /// Get category for grouping in help screen
    pub fn category(&self) -> ActionCategory {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::PageUp
            | Action::PageDown
            | Action::GoToTop
            | Action::GoToBottom => ActionCategory::Navigation,

            Action::Confirm | Action::NextColumn | Action::PrevColumn => ActionCategory::Selection,

            Action::Sort | Action::ReverseSort => ActionCategory::Table,

            Action::FocusNext | Action::FocusPrev | Action::ToggleHelp | Action::Refresh => {
                ActionCategory::View
            }

            Action::Quit | Action::Cancel => ActionCategory::Application,
        }
    }

    /// Get all possible actions (for validation)
    pub fn all() -> Vec<Action> {
        Action::iter().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ActionCategory {
    Navigation,
    Selection,
    Table,
    View,
    Application,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCategory::Navigation => write!(f, "Navigation"),
            ActionCategory::Selection => write!(f, "Column Selection"),
            ActionCategory::Table => write!(f, "Table"),
            ActionCategory::View => write!(f, "View"),
            ActionCategory::Application => write!(f, "Application"),
        }
    }
}
