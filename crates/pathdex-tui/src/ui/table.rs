//! Table grid rendering.
//!
//! Shows the index as a ratatui `Table` with an optional row-number gutter.
//! Columns scroll horizontally so the cursor column is always visible; the
//! cell being edited shows its draft instead of the stored value.

use std::collections::BTreeSet;

use pathdex_core::config::theme::{parse_color, Theme};
use pathdex_core::session::ActiveEdit;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

/// Data needed to render the table.
pub struct TableProps<'a> {
    pub headers: &'a [String],
    pub rows: &'a [Vec<String>],
    pub path_column: Option<usize>,
    /// `(row, column)` of the cursor.
    pub cursor: (usize, usize),
    pub marked: &'a BTreeSet<usize>,
    pub edit: Option<&'a ActiveEdit>,
    pub column_width: u16,
    pub show_row_numbers: bool,
    pub title: &'a str,
}

/// Renders the table grid into `area`.
pub fn render_table(f: &mut Frame, area: Rect, props: &TableProps<'_>, theme: &Theme) {
    let header_fg = parse_color(&theme.table.header_fg);
    let path_header_fg = parse_color(&theme.table.path_header_fg);
    let selected_fg = parse_color(&theme.table.selected_fg);
    let marked_fg = parse_color(&theme.table.marked_fg);
    let row_number_fg = parse_color(&theme.table.row_number_fg);
    let border_fg = parse_color(&theme.table.border_fg);
    let edit_style = Style::default()
        .fg(parse_color(&theme.edit.fg))
        .bg(parse_color(&theme.edit.bg));

    let gutter = if props.show_row_numbers {
        gutter_width(props.rows.len())
    } else {
        0
    };
    let column_width = props.column_width.max(1);
    let inner_width = area.width.saturating_sub(2).saturating_sub(gutter);
    let max_visible = columns_that_fit(inner_width, column_width);
    let (start, end) = visible_columns(props.cursor.1, props.headers.len(), max_visible);

    let mut header_cells = Vec::with_capacity(end - start + 1);
    if props.show_row_numbers {
        header_cells.push(Cell::from("#").style(Style::default().fg(row_number_fg)));
    }
    for (idx, name) in props.headers.iter().enumerate().take(end).skip(start) {
        let fg = if Some(idx) == props.path_column {
            path_header_fg
        } else {
            header_fg
        };
        header_cells.push(
            Cell::from(name.as_str()).style(Style::default().fg(fg).add_modifier(Modifier::BOLD)),
        );
    }

    let rows: Vec<Row> = props
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, values)| {
            let is_marked = props.marked.contains(&row_idx);
            let row_style = if is_marked {
                Style::default().fg(marked_fg)
            } else {
                Style::default()
            };

            let mut cells = Vec::with_capacity(end - start + 1);
            if props.show_row_numbers {
                let marker = if is_marked { "*" } else { " " };
                cells.push(
                    Cell::from(format!("{marker}{}", row_idx + 1))
                        .style(Style::default().fg(row_number_fg)),
                );
            }
            for col_idx in start..end {
                let value = values.get(col_idx).map(String::as_str).unwrap_or("");
                let cell = match props.edit {
                    Some(edit) if edit.row == row_idx && edit.column == col_idx => {
                        Cell::from(Span::styled(format!("{}_", edit.draft), edit_style))
                    }
                    _ if props.cursor == (row_idx, col_idx) => Cell::from(value).style(
                        Style::default()
                            .fg(selected_fg)
                            .add_modifier(Modifier::REVERSED),
                    ),
                    _ => Cell::from(value),
                };
                cells.push(cell);
            }
            Row::new(cells).style(row_style)
        })
        .collect();

    let mut widths = Vec::with_capacity(end - start + 1);
    if props.show_row_numbers {
        widths.push(Constraint::Length(gutter));
    }
    widths.extend((start..end).map(|_| Constraint::Length(column_width)));

    let title = if start > 0 || end < props.headers.len() {
        format!(
            "{} [columns {}-{} of {}]",
            props.title,
            start + 1,
            end,
            props.headers.len()
        )
    } else {
        props.title.to_owned()
    };

    let table = Table::new(rows, widths)
        .header(Row::new(header_cells))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border_fg)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut state = TableState::default();
    if !props.rows.is_empty() {
        state.select(Some(props.cursor.0));
    }
    f.render_stateful_widget(table, area, &mut state);
}

/// Width of the row-number gutter: a mark slot plus the widest row number.
fn gutter_width(row_count: usize) -> u16 {
    let digits = row_count.max(1).to_string().len() as u16;
    digits + 1
}

/// How many columns of `column_width` plus a one-cell gap fit in `width`.
/// Always at least one.
fn columns_that_fit(width: u16, column_width: u16) -> usize {
    (width / column_width.saturating_add(1)).max(1) as usize
}

/// Computes the visible column window `(start, end)` so that `cursor` is
/// always in view when at most `max_visible` columns fit.
fn visible_columns(cursor: usize, total: usize, max_visible: usize) -> (usize, usize) {
    if total <= max_visible {
        return (0, total);
    }
    let start = if cursor >= max_visible {
        cursor + 1 - max_visible
    } else {
        0
    };
    (start, (start + max_visible).min(total))
}
