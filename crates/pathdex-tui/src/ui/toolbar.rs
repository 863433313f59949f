//! One-line toolbar listing the main actions and their keys.

use pathdex_core::action::{Action, ActionRegistry};
use pathdex_core::config::keymap::Keymap;
use pathdex_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const TOOLBAR_ACTIONS: [Action; 8] = [
    Action::AddRow,
    Action::DeleteRows,
    Action::ToggleMark,
    Action::EditCell,
    Action::Save,
    Action::Rescan,
    Action::Help,
    Action::Quit,
];

/// `(key, label)` pairs for the toolbar. Unbound actions are left out.
pub fn toolbar_items(keymap: &Keymap, registry: &ActionRegistry) -> Vec<(String, &'static str)> {
    TOOLBAR_ACTIONS
        .iter()
        .filter_map(|&action| {
            let key = keymap.keys_for_action(action)?.first()?.clone();
            let name = registry.descriptor_for(action)?.name;
            Some((key, name))
        })
        .collect()
}

pub fn render_toolbar(f: &mut Frame, area: Rect, items: &[(String, &str)], theme: &Theme) {
    let key_style = Style::default()
        .fg(parse_color(&theme.toolbar.key_fg))
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(parse_color(&theme.toolbar.label_fg));

    let spans: Vec<Span> = items
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!(" [{key}]"), key_style),
                Span::styled(format!(" {label} "), label_style),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
