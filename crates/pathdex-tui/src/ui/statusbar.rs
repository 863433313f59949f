//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the cursor position, the current column, the index file with an
//! unsaved-changes marker, and the last status message.

use pathdex_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::StatusMessage;

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub row: usize,
    pub row_count: usize,
    pub column_name: Option<&'a str>,
    pub index_name: &'a str,
    pub dirty: bool,
    pub marked: usize,
    pub editing: bool,
    pub status_message: Option<&'a StatusMessage>,
}

pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>, theme: &Theme) {
    let bg = parse_color(&theme.statusbar.bg);
    let position_fg = parse_color(&theme.statusbar.position_fg);
    let dirty_fg = parse_color(&theme.statusbar.dirty_fg);

    let column = props
        .column_name
        .map(|name| format!("  {name}"))
        .unwrap_or_default();
    let marked = if props.marked > 0 {
        format!("  [{} marked]", props.marked)
    } else {
        String::new()
    };
    let editing = if props.editing { "  -- EDIT --" } else { "" };
    let dirty_marker = if props.dirty { " [+]" } else { "" };

    let line = Line::from(vec![
        Span::styled(
            position_text(props.row, props.row_count),
            Style::default()
                .fg(position_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(column, Style::default().fg(position_fg).bg(bg)),
        Span::styled(
            format!("  {}", props.index_name),
            Style::default().fg(position_fg).bg(bg),
        ),
        Span::styled(
            dirty_marker.to_owned(),
            Style::default()
                .fg(dirty_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(marked, Style::default().fg(position_fg).bg(bg)),
        Span::styled(
            editing.to_owned(),
            Style::default()
                .fg(position_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        message_span(props.status_message, theme),
    ]);

    let bar = Paragraph::new(line).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

fn position_text(row: usize, row_count: usize) -> String {
    if row_count > 0 {
        format!(" {}/{}", row + 1, row_count)
    } else {
        " 0/0".to_owned()
    }
}

fn message_span(message: Option<&StatusMessage>, theme: &Theme) -> Span<'static> {
    let Some(message) = message else {
        return Span::raw("");
    };
    let bg = parse_color(&theme.statusbar.bg);
    let style = if message.is_error() {
        Style::default()
            .fg(parse_color(&theme.statusbar.error_fg))
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(parse_color(&theme.statusbar.message_fg))
            .bg(bg)
            .add_modifier(Modifier::ITALIC)
    };
    Span::styled(format!("  {}", message.text()), style)
}
