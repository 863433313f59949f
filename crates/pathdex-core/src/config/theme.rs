//! Theme configuration for pathdex.
//!
//! Colors are stored as strings (e.g. `"blue"`, `"#ff5500"`) and converted
//! to [`ratatui::style::Color`] at render time via [`parse_color`].

use serde::{Deserialize, Serialize};

/// Complete theme configuration with per-component color groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub table: TableTheme,
    #[serde(default)]
    pub edit: EditTheme,
    #[serde(default)]
    pub toolbar: ToolbarTheme,
    #[serde(default)]
    pub statusbar: StatusBarTheme,
    #[serde(default)]
    pub popup: PopupTheme,
}

/// Table grid colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableTheme {
    pub header_fg: String,
    pub path_header_fg: String,
    pub selected_fg: String,
    pub marked_fg: String,
    pub row_number_fg: String,
    pub border_fg: String,
}

impl Default for TableTheme {
    fn default() -> Self {
        Self {
            header_fg: "cyan".to_string(),
            path_header_fg: "green".to_string(),
            selected_fg: "yellow".to_string(),
            marked_fg: "magenta".to_string(),
            row_number_fg: "dark_gray".to_string(),
            border_fg: "dark_gray".to_string(),
        }
    }
}

/// Colors of the cell being edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditTheme {
    pub fg: String,
    pub bg: String,
}

impl Default for EditTheme {
    fn default() -> Self {
        Self {
            fg: "black".to_string(),
            bg: "light_yellow".to_string(),
        }
    }
}

/// Toolbar colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarTheme {
    pub key_fg: String,
    pub label_fg: String,
}

impl Default for ToolbarTheme {
    fn default() -> Self {
        Self {
            key_fg: "yellow".to_string(),
            label_fg: "white".to_string(),
        }
    }
}

/// Status bar colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBarTheme {
    pub bg: String,
    pub position_fg: String,
    pub dirty_fg: String,
    pub message_fg: String,
    pub error_fg: String,
}

impl Default for StatusBarTheme {
    fn default() -> Self {
        Self {
            bg: "white".to_string(),
            position_fg: "black".to_string(),
            dirty_fg: "red".to_string(),
            message_fg: "magenta".to_string(),
            error_fg: "red".to_string(),
        }
    }
}

/// Popup/dialog colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupTheme {
    pub border_fg: String,
}

impl Default for PopupTheme {
    fn default() -> Self {
        Self {
            border_fg: "yellow".to_string(),
        }
    }
}

/// Parses a color string into a `ratatui::style::Color`.
///
/// Supports named colors (`"blue"`, `"dark_gray"`) and hex (`"#rrggbb"`).
/// Returns `Color::Reset` for unrecognised values.
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "light_red" | "lightred" => Color::LightRed,
        "light_green" | "lightgreen" => Color::LightGreen,
        "light_yellow" | "lightyellow" => Color::LightYellow,
        "light_blue" | "lightblue" => Color::LightBlue,
        "light_magenta" | "lightmagenta" => Color::LightMagenta,
        "light_cyan" | "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        hex if hex.starts_with('#') && hex.len() == 7 => {
            let r = u8::from_str_radix(&hex[1..3], 16).unwrap_or(0);
            let g = u8::from_str_radix(&hex[3..5], 16).unwrap_or(0);
            let b = u8::from_str_radix(&hex[5..7], 16).unwrap_or(0);
            Color::Rgb(r, g, b)
        }
        _ => Color::Reset,
    }
}
