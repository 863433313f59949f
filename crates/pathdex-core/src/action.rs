//! Action system for the table editor.
//!
//! Every user-triggerable action is represented by the [`Action`] enum.
//! [`ActionRegistry`] provides metadata (id, name, description, category)
//! used by keymap loading and the help overlay.

/// Every user-triggerable action in pathdex.
///
/// Variants carry no parameters; context is determined at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    CursorTop,
    CursorBottom,
    // Rows
    AddRow,
    DeleteRows,
    ToggleMark,
    // Cells
    EditCell,
    // Index
    Save,
    Rescan,
    // System
    Help,
    Quit,
}

/// Broad category for grouping actions in the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Rows,
    Cells,
    Index,
    System,
}

impl ActionCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Rows => "Rows",
            Self::Cells => "Cells",
            Self::Index => "Index",
            Self::System => "System",
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"add_row"`).
    pub id: &'static str,
    /// Human-readable name (e.g. `"Add Row"`).
    pub name: &'static str,
    pub description: &'static str,
    pub category: ActionCategory,
}

/// Registry of all available actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry containing every known action.
    pub fn new() -> Self {
        let descriptors = vec![
            // Navigation
            ActionDescriptor {
                action: Action::CursorUp,
                id: "cursor_up",
                name: "Cursor Up",
                description: "Move to the previous row",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorDown,
                id: "cursor_down",
                name: "Cursor Down",
                description: "Move to the next row",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorLeft,
                id: "cursor_left",
                name: "Cursor Left",
                description: "Move to the previous column",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorRight,
                id: "cursor_right",
                name: "Cursor Right",
                description: "Move to the next column",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorTop,
                id: "cursor_top",
                name: "First Row",
                description: "Jump to the first row",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorBottom,
                id: "cursor_bottom",
                name: "Last Row",
                description: "Jump to the last row",
                category: ActionCategory::Navigation,
            },
            // Rows
            ActionDescriptor {
                action: Action::AddRow,
                id: "add_row",
                name: "Add Row",
                description: "Append an empty row",
                category: ActionCategory::Rows,
            },
            ActionDescriptor {
                action: Action::DeleteRows,
                id: "delete_rows",
                name: "Delete Rows",
                description: "Delete marked rows, or the current row",
                category: ActionCategory::Rows,
            },
            ActionDescriptor {
                action: Action::ToggleMark,
                id: "toggle_mark",
                name: "Mark Row",
                description: "Toggle the mark on the current row",
                category: ActionCategory::Rows,
            },
            // Cells
            ActionDescriptor {
                action: Action::EditCell,
                id: "edit_cell",
                name: "Edit Cell",
                description: "Edit the value under the cursor",
                category: ActionCategory::Cells,
            },
            // Index
            ActionDescriptor {
                action: Action::Save,
                id: "save",
                name: "Save",
                description: "Write the table to the index file",
                category: ActionCategory::Index,
            },
            ActionDescriptor {
                action: Action::Rescan,
                id: "rescan",
                name: "Rescan",
                description: "Add new text files from the scan directory",
                category: ActionCategory::Index,
            },
            // System
            ActionDescriptor {
                action: Action::Help,
                id: "help",
                name: "Help",
                description: "Show key bindings",
                category: ActionCategory::System,
            },
            ActionDescriptor {
                action: Action::Quit,
                id: "quit",
                name: "Quit",
                description: "Exit pathdex",
                category: ActionCategory::System,
            },
        ];
        Self { descriptors }
    }

    /// Returns all descriptors.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Finds an action by its string id (for keymap.toml parsing).
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    /// Returns the descriptor for a given action.
    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
