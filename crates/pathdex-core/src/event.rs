//! Event system for communication between UI and Core.
//!
//! The UI translates user input into [`Command`]s, which
//! [`EditSession::apply`](crate::session::EditSession::apply) processes and
//! answers with an [`Event`]. Any frontend can drive the same session this
//! way.

use std::path::PathBuf;

/// An operation the UI requests the edit session to perform.
///
/// Commands flow **UI → Core**. The core never creates commands itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append an empty row.
    AddRow,
    /// Remove the rows at the given display positions.
    DeleteRows(Vec<usize>),
    /// Start editing one cell, resolving any edit already in progress.
    BeginEdit { row: usize, column: usize },
    /// Replace the draft of the active edit.
    SetDraft(String),
    /// Store the active draft (confirm key or focus loss).
    CommitEdit,
    /// Drop the active draft.
    CancelEdit,
    /// Write the table to the index file.
    Save(PathBuf),
    /// Merge newly discovered files under `scan_dir` into the table.
    Rescan { root: PathBuf, scan_dir: PathBuf },
}

/// A notification the session sends back to the UI.
///
/// Events flow **Core → UI**. The UI uses these to update its display state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RowAdded(usize),
    /// Positions that were removed, ascending.
    RowsDeleted(Vec<usize>),
    EditStarted {
        row: usize,
        column: usize,
    },
    DraftChanged,
    /// A cell received its committed value.
    CellCommitted {
        row: usize,
        column: usize,
        value: String,
    },
    EditCancelled,
    Saved {
        path: PathBuf,
        rows: usize,
    },
    Rescanned {
        added: usize,
    },
}

impl Event {
    /// One-line summary for a status bar.
    pub fn describe(&self) -> String {
        match self {
            Self::RowAdded(row) => format!("Added row {}", row + 1),
            Self::RowsDeleted(rows) if rows.is_empty() => "Nothing selected".to_string(),
            Self::RowsDeleted(rows) => format!("Deleted {} row(s)", rows.len()),
            Self::EditStarted { row, column } => {
                format!("Editing row {}, column {}", row + 1, column + 1)
            }
            Self::DraftChanged => String::new(),
            Self::CellCommitted { value, .. } => format!("Stored \"{value}\""),
            Self::EditCancelled => "Edit cancelled".to_string(),
            Self::Saved { path, rows } => format!("Saved {rows} rows to {}", path.display()),
            Self::Rescanned { added: 0 } => "Index is up to date".to_string(),
            Self::Rescanned { added } => format!("Indexed {added} new file(s)"),
        }
    }
}
