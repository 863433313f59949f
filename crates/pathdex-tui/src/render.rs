use pathdex_core::action::ActionRegistry;
use pathdex_core::config::keymap::Keymap;
use pathdex_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, AppMode, ConfirmAction};
use crate::ui::popup::render_popup;
use crate::ui::statusbar::{render_statusbar, StatusBarProps};
use crate::ui::table::{render_table, TableProps};
use crate::ui::toolbar::{render_toolbar, toolbar_items};

/// Main render function: composes the full UI layout each frame.
pub fn render(f: &mut Frame, app: &App) {
    let theme = app.theme();
    let editing = app.session().is_editing();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(if editing { 1 } else { 0 }),
            Constraint::Length(1),
        ])
        .split(f.area());

    let items = toolbar_items(app.keymap(), app.action_registry());
    render_toolbar(f, chunks[0], &items, theme);

    let session = app.session();
    let index_name = app
        .paths()
        .index
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| app.paths().index.display().to_string());

    let props = TableProps {
        headers: session.headers(),
        rows: session.rows(),
        path_column: session.path_column(),
        cursor: app.cursor(),
        marked: app.marked(),
        edit: session.active_edit(),
        column_width: app.ui().column_width,
        show_row_numbers: app.ui().show_row_numbers,
        title: &index_name,
    };
    render_table(f, chunks[1], &props, theme);

    if editing {
        render_edit_prompt(f, chunks[2], app, theme);
    }

    let (row, col) = app.cursor();
    let status = StatusBarProps {
        row,
        row_count: session.rows().len(),
        column_name: session.headers().get(col).map(String::as_str),
        index_name: &index_name,
        dirty: session.is_dirty(),
        marked: app.marked().len(),
        editing,
        status_message: app.status_message(),
    };
    render_statusbar(f, chunks[3], &status, theme);

    // Modal overlays
    match app.mode() {
        AppMode::Help => render_popup(
            f,
            "Help",
            &help_lines(app.action_registry(), app.keymap()),
            theme,
        ),
        AppMode::Confirm(action) => render_popup(f, "Confirm", &confirm_lines(action), theme),
        AppMode::Normal | AppMode::Editing => {}
    }
}

fn render_edit_prompt(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let session = app.session();
    let Some(edit) = session.active_edit() else {
        return;
    };
    let header = session
        .headers()
        .get(edit.column)
        .map(String::as_str)
        .unwrap_or("");
    let hint = if Some(edit.column) == session.path_column() {
        "  (creates the path on Enter)"
    } else {
        ""
    };
    let edit_style = Style::default()
        .fg(parse_color(&theme.edit.fg))
        .bg(parse_color(&theme.edit.bg));

    let line = Line::from(vec![
        Span::styled(
            format!(" {header} [row {}]: ", edit.row + 1),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{}_", edit.draft), edit_style),
        Span::styled(hint, Style::default().add_modifier(Modifier::ITALIC)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Help text built from the action registry and the active key bindings.
fn help_lines(registry: &ActionRegistry, keymap: &Keymap) -> Vec<String> {
    let mut lines: Vec<String> = registry
        .all()
        .iter()
        .map(|d| {
            let keys = keymap
                .keys_for_action(d.action)
                .map(|keys| keys.join("/"))
                .unwrap_or_else(|| "-".to_owned());
            format!("{keys:<14} {}", d.description)
        })
        .collect();
    lines.extend([
        String::new(),
        "While editing: Enter stores, Esc cancels,".to_owned(),
        "leaving the terminal window stores too.".to_owned(),
        String::new(),
        "Press Esc or ? to close".to_owned(),
    ]);
    lines
}

fn confirm_lines(action: &ConfirmAction) -> Vec<String> {
    match action {
        ConfirmAction::Quit => vec![
            "The index has unsaved changes.".to_owned(),
            "Quit anyway?".to_owned(),
            String::new(),
            "y - Yes, quit without saving".to_owned(),
            "n - No, go back".to_owned(),
        ],
    }
}
