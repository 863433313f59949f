//! Interactive editing of a loaded index.
//!
//! [`EditSession`] owns the single in-memory table and the single active-edit
//! slot. It is a small state machine: `Idle` → `Editing { row, column, draft }`
//! → `Idle`. Commits on the path column go through
//! [`materialize::commit`] before the cell changes.

use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::event::{Command, Event};
use crate::fs::materialize::{self, FileSystem, WorkingDirFs};
use crate::reconcile::{self, Scan};
use crate::store;
use crate::table::Table;

/// The cell currently being edited and its uncommitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEdit {
    pub row: usize,
    pub column: usize,
    pub draft: String,
}

/// Whether a cell edit is in progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(ActiveEdit),
}

/// Edit session over one table.
#[derive(Debug)]
pub struct EditSession<F: FileSystem = WorkingDirFs> {
    table: Table,
    path_column: Option<usize>,
    state: EditState,
    fs: F,
    dirty: bool,
}

impl<F: FileSystem> EditSession<F> {
    /// Prepares `table` for display: rows are fitted to the header width and
    /// the path column is located (not created).
    pub fn new(mut table: Table, fs: F) -> Self {
        table.normalize_rows();
        let path_column = table.find_path_column();
        Self {
            table,
            path_column,
            state: EditState::Idle,
            fs,
            dirty: false,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn headers(&self) -> &[String] {
        self.table.headers()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        self.table.rows()
    }

    /// Column whose commits materialize paths, if the table has one.
    pub fn path_column(&self) -> Option<usize> {
        self.path_column
    }

    pub fn edit_state(&self) -> &EditState {
        &self.state
    }

    pub fn active_edit(&self) -> Option<&ActiveEdit> {
        match &self.state {
            EditState::Editing(edit) => Some(edit),
            EditState::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    /// `true` when the table differs from what was last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Appends an empty row and returns its position.
    pub fn add_row(&mut self) -> usize {
        self.dirty = true;
        self.table.push_empty_row()
    }

    /// Removes every selected position. Returns the removed positions.
    ///
    /// An edit on a removed row is cancelled; an edit below removed rows
    /// follows its row.
    pub fn delete_rows(&mut self, selection: &[usize]) -> Vec<usize> {
        let removed = self.table.remove_rows(selection);
        if removed.is_empty() {
            return removed;
        }
        self.dirty = true;

        let edited_row_removed = match &mut self.state {
            EditState::Editing(edit) if removed.binary_search(&edit.row).is_ok() => true,
            EditState::Editing(edit) => {
                edit.row -= removed.iter().filter(|&&r| r < edit.row).count();
                false
            }
            EditState::Idle => false,
        };
        if edited_row_removed {
            self.state = EditState::Idle;
        }
        removed
    }

    /// Starts editing `(row, column)` with the cell's value as the draft.
    ///
    /// An edit already in progress is committed first, as if it lost focus.
    ///
    /// # Errors
    ///
    /// - [`CoreError::CellOutOfRange`] for a cell that does not exist.
    /// - Any error from committing the previous edit; the previous edit then
    ///   stays active.
    pub fn begin_edit(&mut self, row: usize, column: usize) -> CoreResult<()> {
        let current = self
            .table
            .cell(row, column)
            .ok_or(CoreError::CellOutOfRange { row, column })?
            .to_string();

        if self.is_editing() {
            self.commit_edit()?;
        }

        self.state = EditState::Editing(ActiveEdit {
            row,
            column,
            draft: current,
        });
        Ok(())
    }

    fn draft_mut(&mut self) -> CoreResult<&mut String> {
        match &mut self.state {
            EditState::Editing(edit) => Ok(&mut edit.draft),
            EditState::Idle => Err(CoreError::NoActiveEdit),
        }
    }

    pub fn set_draft(&mut self, value: impl Into<String>) -> CoreResult<()> {
        *self.draft_mut()? = value.into();
        Ok(())
    }

    pub fn push_char(&mut self, c: char) -> CoreResult<()> {
        self.draft_mut()?.push(c);
        Ok(())
    }

    pub fn pop_char(&mut self) -> CoreResult<()> {
        self.draft_mut()?.pop();
        Ok(())
    }

    /// Stores the active draft and returns to `Idle`.
    ///
    /// On the path column the draft is normalized and materialized first; if
    /// that fails the cell keeps its old value and the edit stays active.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NoActiveEdit`] when idle.
    /// - [`CoreError::Materialize`] when the path entry cannot be created.
    pub fn commit_edit(&mut self) -> CoreResult<Event> {
        let EditState::Editing(edit) = &self.state else {
            return Err(CoreError::NoActiveEdit);
        };
        let (row, column) = (edit.row, edit.column);

        let value = if Some(column) == self.path_column {
            materialize::commit(&edit.draft, &self.fs).inspect_err(|e| {
                tracing::warn!("path commit at row {row} failed: {e}");
            })?
        } else {
            edit.draft.clone()
        };

        let cell = self
            .table
            .cell_mut(row, column)
            .ok_or(CoreError::CellOutOfRange { row, column })?;
        if *cell != value {
            *cell = value.clone();
            self.dirty = true;
        }
        self.state = EditState::Idle;

        Ok(Event::CellCommitted { row, column, value })
    }

    /// Drops the active draft; the cell keeps its pre-edit value.
    pub fn cancel_edit(&mut self) -> CoreResult<Event> {
        if !self.is_editing() {
            return Err(CoreError::NoActiveEdit);
        }
        self.state = EditState::Idle;
        Ok(Event::EditCancelled)
    }

    /// Writes the whole table to `path` and clears the dirty flag.
    pub fn save(&mut self, path: &Path) -> CoreResult<Event> {
        store::save(path, &self.table)?;
        self.dirty = false;
        Ok(Event::Saved {
            path: path.to_path_buf(),
            rows: self.table.row_count(),
        })
    }

    /// Reconciles `scan_dir` into the live table.
    ///
    /// # Errors
    ///
    /// - [`CoreError::EditInProgress`] unless idle.
    /// - Any reconciliation error; the table is left unchanged.
    pub fn rescan(&mut self, root: &Path, scan_dir: &Path) -> CoreResult<Event> {
        if self.is_editing() {
            return Err(CoreError::EditInProgress);
        }
        let found = reconcile::scan(root, scan_dir)?;
        self.merge_scan(found)
    }

    /// Merges an already gathered scan into the live table.
    ///
    /// # Errors
    ///
    /// [`CoreError::EditInProgress`] unless idle.
    pub fn merge_scan(&mut self, found: Scan) -> CoreResult<Event> {
        if self.is_editing() {
            return Err(CoreError::EditInProgress);
        }
        let out = reconcile::merge(self.table.clone(), found);
        if out.table != self.table {
            self.dirty = true;
        }
        self.table = out.table;
        self.path_column = Some(out.path_column);
        Ok(Event::Rescanned {
            added: out.added.len(),
        })
    }

    /// Dispatches a UI [`Command`].
    pub fn apply(&mut self, command: Command) -> CoreResult<Event> {
        match command {
            Command::AddRow => Ok(Event::RowAdded(self.add_row())),
            Command::DeleteRows(selection) => Ok(Event::RowsDeleted(self.delete_rows(&selection))),
            Command::BeginEdit { row, column } => {
                self.begin_edit(row, column)?;
                Ok(Event::EditStarted { row, column })
            }
            Command::SetDraft(value) => {
                self.set_draft(value)?;
                Ok(Event::DraftChanged)
            }
            Command::CommitEdit => self.commit_edit(),
            Command::CancelEdit => self.cancel_edit(),
            Command::Save(path) => self.save(&path),
            Command::Rescan { root, scan_dir } => self.rescan(&root, &scan_dir),
        }
    }
}
