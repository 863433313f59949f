use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pathdex_core::action::Action;
use pathdex_core::config::keymap::Keymap;

use crate::app::AppMode;

/// Actions that can result from a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    CursorTop,
    CursorBottom,
    AddRow,
    /// Delete marked rows, or the cursor row when none are marked.
    DeleteRows,
    ToggleMark,
    /// Start editing the cell under the cursor.
    BeginEdit,
    /// Append a character to the draft.
    DraftChar(char),
    /// Append pasted text to the draft.
    DraftPaste(String),
    /// Remove the last character from the draft.
    DraftBackspace,
    CommitEdit,
    CancelEdit,
    Save,
    Rescan,
    /// Quit, asking first when there are unsaved changes.
    RequestQuit,
    /// User confirmed the pending action.
    ConfirmApproved,
    /// Enter a new AppMode.
    EnterMode(AppMode),
    /// Quit without asking (Ctrl+C).
    Quit,
    /// No action for this key.
    None,
}

/// Maps a key event to an InputAction based on the current mode.
///
/// In Normal mode keys are resolved through the `Keymap`; only Ctrl+C is
/// hardcoded. Editing, Confirm and Help keys are fixed.
pub fn handle_key(key: KeyEvent, mode: &AppMode, keymap: &Keymap) -> InputAction {
    match mode {
        AppMode::Normal => handle_normal_key(key, keymap),
        AppMode::Editing => handle_editing_key(key),
        AppMode::Confirm(_) => handle_confirm_key(key),
        AppMode::Help => handle_help_key(key),
    }
}

/// The name a key has in `keymap.toml` (e.g. `"j"`, `"Space"`, `"Ctrl+s"`).
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let base = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => return None,
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        Some(format!("Ctrl+{base}"))
    } else {
        Some(base)
    }
}

/// Converts an `Action` enum variant to the corresponding `InputAction`.
pub fn resolve_action(action: Action) -> InputAction {
    match action {
        Action::CursorUp => InputAction::CursorUp,
        Action::CursorDown => InputAction::CursorDown,
        Action::CursorLeft => InputAction::CursorLeft,
        Action::CursorRight => InputAction::CursorRight,
        Action::CursorTop => InputAction::CursorTop,
        Action::CursorBottom => InputAction::CursorBottom,
        Action::AddRow => InputAction::AddRow,
        Action::DeleteRows => InputAction::DeleteRows,
        Action::ToggleMark => InputAction::ToggleMark,
        Action::EditCell => InputAction::BeginEdit,
        Action::Save => InputAction::Save,
        Action::Rescan => InputAction::Rescan,
        Action::Help => InputAction::EnterMode(AppMode::Help),
        Action::Quit => InputAction::RequestQuit,
    }
}

fn handle_normal_key(key: KeyEvent, keymap: &Keymap) -> InputAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputAction::Quit;
    }
    key_name(&key)
        .and_then(|name| keymap.action_for_key(&name))
        .map(resolve_action)
        .unwrap_or(InputAction::None)
}

fn handle_editing_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Enter => InputAction::CommitEdit,
        KeyCode::Esc => InputAction::CancelEdit,
        KeyCode::Backspace => InputAction::DraftBackspace,
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::None,
        KeyCode::Char(c) => InputAction::DraftChar(c),
        _ => InputAction::None,
    }
}

fn handle_confirm_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => InputAction::ConfirmApproved,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            InputAction::EnterMode(AppMode::Normal)
        }
        _ => InputAction::None,
    }
}

fn handle_help_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            InputAction::EnterMode(AppMode::Normal)
        }
        _ => InputAction::None,
    }
}
