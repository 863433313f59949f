use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use pathdex_core::action::ActionRegistry;
use pathdex_core::config::keymap::Keymap;
use pathdex_core::config::settings::{Config, UiConfig};
use pathdex_core::config::theme::Theme;
use pathdex_core::event::{Command, Event};
use pathdex_core::fs::WorkingDirFs;
use pathdex_core::session::EditSession;
use pathdex_core::{store, CoreResult};

use crate::input::InputAction;

/// Application mode, which determines how input is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// A cell edit is active; keys go to the draft.
    Editing,
    Confirm(ConfirmAction),
    Help,
}

/// What action is pending user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Quit although the table has unsaved changes.
    Quit,
}

/// A line for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Info(s) | Self::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Where the index is read from and written to, and what rescans walk.
#[derive(Debug, Clone)]
pub struct IndexPaths {
    /// The CSV file.
    pub index: PathBuf,
    /// Working directory: paths in the table and created entries are relative to it.
    pub root: PathBuf,
    /// Scan directory, relative to `root`.
    pub scan_dir: PathBuf,
}

impl IndexPaths {
    pub fn from_config(config: &Config, root: &Path, index_override: Option<PathBuf>) -> Self {
        Self {
            index: index_override.unwrap_or_else(|| root.join(&config.index.file)),
            root: root.to_path_buf(),
            scan_dir: config.index.scan_dir.clone(),
        }
    }
}

/// Top-level TUI state: the edit session plus cursor, marks and mode.
#[derive(Debug)]
pub struct App {
    session: EditSession<WorkingDirFs>,
    paths: IndexPaths,
    mode: AppMode,
    cursor_row: usize,
    cursor_col: usize,
    marked: BTreeSet<usize>,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    keymap: Keymap,
    action_registry: ActionRegistry,
    theme: Theme,
    ui: UiConfig,
}

impl App {
    /// Loads the index at `paths.index` and opens an edit session over it.
    pub fn open(paths: IndexPaths, config: &Config, keymap: Keymap) -> CoreResult<Self> {
        let table = store::load(&paths.index)?;
        let session = EditSession::new(table, WorkingDirFs::new(&paths.root));
        tracing::info!(
            "opened {} ({} rows, {} columns)",
            paths.index.display(),
            session.rows().len(),
            session.headers().len()
        );
        Ok(Self::new(session, paths, config, keymap))
    }

    pub fn new(
        session: EditSession<WorkingDirFs>,
        paths: IndexPaths,
        config: &Config,
        keymap: Keymap,
    ) -> Self {
        let status_message = if session.path_column().is_none() {
            Some(StatusMessage::Info(
                "No Path column: path cells will not be created until a rescan".to_string(),
            ))
        } else {
            None
        };
        Self {
            session,
            paths,
            mode: AppMode::Normal,
            cursor_row: 0,
            cursor_col: 0,
            marked: BTreeSet::new(),
            should_quit: false,
            status_message,
            keymap,
            action_registry: ActionRegistry::new(),
            theme: config.theme.clone(),
            ui: config.ui.clone(),
        }
    }

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn session(&self) -> &EditSession<WorkingDirFs> {
        &self.session
    }

    pub fn paths(&self) -> &IndexPaths {
        &self.paths
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn marked(&self) -> &BTreeSet<usize> {
        &self.marked
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status_message(&self) -> Option<&StatusMessage> {
        self.status_message.as_ref()
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.action_registry
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn ui(&self) -> &UiConfig {
        &self.ui
    }

    /// Transition to a new mode.
    pub fn with_mode(self, mode: AppMode) -> Self {
        Self { mode, ..self }
    }

    /// Mark the app for quitting.
    pub fn with_quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }

    /// Set an informational status message.
    pub fn with_status(self, msg: String) -> Self {
        Self {
            status_message: Some(StatusMessage::Info(msg)),
            ..self
        }
    }

    /// Set an error status message.
    pub fn with_error(self, msg: String) -> Self {
        Self {
            status_message: Some(StatusMessage::Error(msg)),
            ..self
        }
    }

    /// Clear the status message.
    pub fn with_clear_status(self) -> Self {
        Self {
            status_message: None,
            ..self
        }
    }

    fn row_count(&self) -> usize {
        self.session.rows().len()
    }

    fn column_count(&self) -> usize {
        self.session.headers().len()
    }

    fn with_cursor(self, row: usize, col: usize) -> Self {
        let row = row.min(self.row_count().saturating_sub(1));
        let col = col.min(self.column_count().saturating_sub(1));
        Self {
            cursor_row: row,
            cursor_col: col,
            ..self
        }
    }

    /// Routes one resolved key (or paste) to the session and view state.
    pub fn handle_input(self, action: InputAction) -> Self {
        let (row, col) = self.cursor();
        match action {
            InputAction::None => self,
            InputAction::CursorUp => self.with_cursor(row.saturating_sub(1), col),
            InputAction::CursorDown => self.with_cursor(row + 1, col),
            InputAction::CursorLeft => self.with_cursor(row, col.saturating_sub(1)),
            InputAction::CursorRight => self.with_cursor(row, col + 1),
            InputAction::CursorTop => self.with_cursor(0, col),
            InputAction::CursorBottom => self.with_cursor(usize::MAX, col),
            InputAction::AddRow => self.with_clear_status().add_row(),
            InputAction::DeleteRows => self.with_clear_status().delete_rows(),
            InputAction::ToggleMark => self.toggle_mark(),
            InputAction::BeginEdit => self.with_clear_status().begin_edit(),
            InputAction::DraftChar(c) => self.edit_draft(|s| s.push_char(c)),
            InputAction::DraftPaste(text) => {
                let line: String = text.chars().filter(|c| !c.is_control()).collect();
                self.edit_draft(move |s| {
                    let mut draft = s.active_edit().map(|e| e.draft.clone()).unwrap_or_default();
                    draft.push_str(&line);
                    s.set_draft(draft)
                })
            }
            InputAction::DraftBackspace => self.edit_draft(|s| s.pop_char()),
            InputAction::CommitEdit => self.commit_edit(),
            InputAction::CancelEdit => self.run(Command::CancelEdit).with_mode(AppMode::Normal),
            InputAction::Save => {
                let path = self.paths.index.clone();
                self.with_clear_status().run(Command::Save(path))
            }
            InputAction::Rescan => {
                let root = self.paths.root.clone();
                let scan_dir = root.join(&self.paths.scan_dir);
                self.with_clear_status()
                    .run(Command::Rescan { root, scan_dir })
            }
            InputAction::RequestQuit => self.request_quit(),
            InputAction::ConfirmApproved => {
                if matches!(self.mode, AppMode::Confirm(ConfirmAction::Quit)) {
                    self.with_quit()
                } else {
                    self.with_mode(AppMode::Normal)
                }
            }
            InputAction::EnterMode(mode) => self.with_mode(mode),
            InputAction::Quit => self.with_quit(),
        }
    }

    /// Terminal focus moved away: an active edit is committed.
    pub fn handle_focus_lost(self) -> Self {
        if self.session.is_editing() {
            self.commit_edit()
        } else {
            self
        }
    }

    /// Applies `command` and reports the resulting event or error.
    fn run(mut self, command: Command) -> Self {
        match self.session.apply(command) {
            Ok(event) => self.after_event(event),
            Err(e) => {
                tracing::warn!("{e}");
                self.with_error(e.to_string())
            }
        }
    }

    fn after_event(self, event: Event) -> Self {
        let message = event.describe();
        let app = match &event {
            Event::RowsDeleted(_) => {
                let (row, col) = self.cursor();
                Self {
                    marked: BTreeSet::new(),
                    ..self
                }
                .with_cursor(row, col)
            }
            Event::Rescanned { .. } => {
                let (row, col) = self.cursor();
                self.with_cursor(row, col)
            }
            _ => self,
        };
        if message.is_empty() {
            app
        } else {
            app.with_status(message)
        }
    }

    fn add_row(self) -> Self {
        let app = self.run(Command::AddRow);
        let last = app.row_count().saturating_sub(1);
        let col = app.cursor_col;
        app.with_cursor(last, col)
    }

    /// Deletes the marked rows, or the cursor row when nothing is marked.
    fn delete_rows(self) -> Self {
        if self.row_count() == 0 {
            return self.with_status("Nothing to delete".to_string());
        }
        let selection: Vec<usize> = if self.marked.is_empty() {
            vec![self.cursor_row]
        } else {
            self.marked.iter().copied().collect()
        };
        self.run(Command::DeleteRows(selection))
    }

    fn toggle_mark(mut self) -> Self {
        if self.row_count() == 0 {
            return self;
        }
        let (row, col) = self.cursor();
        if !self.marked.remove(&row) {
            self.marked.insert(row);
        }
        self.with_cursor(row + 1, col)
    }

    fn begin_edit(self) -> Self {
        if self.row_count() == 0 || self.column_count() == 0 {
            return self.with_status("Add a row first".to_string());
        }
        let (row, column) = self.cursor();
        let app = self.run(Command::BeginEdit { row, column });
        if app.session.is_editing() {
            app.with_mode(AppMode::Editing)
        } else {
            app
        }
    }

    fn edit_draft<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut EditSession<WorkingDirFs>) -> CoreResult<()>,
    {
        match f(&mut self.session) {
            Ok(()) => self,
            Err(e) => self.with_error(e.to_string()).with_mode(AppMode::Normal),
        }
    }

    /// On failure the edit stays open so the draft can be fixed or cancelled.
    fn commit_edit(self) -> Self {
        let app = self.run(Command::CommitEdit);
        if app.session.is_editing() {
            app.with_mode(AppMode::Editing)
        } else {
            app.with_mode(AppMode::Normal)
        }
    }

    fn request_quit(self) -> Self {
        if self.session.is_dirty() && self.ui.confirm_quit_unsaved {
            self.with_mode(AppMode::Confirm(ConfirmAction::Quit))
        } else {
            self.with_quit()
        }
    }
}
