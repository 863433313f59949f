//! Key binding configuration.
//!
//! Key bindings map key names (e.g. `"j"`, `"Space"`, `"Enter"`) to [`Action`]
//! values. The default bindings follow vim conventions for movement.
//!
//! TOML files use string action identifiers (e.g. `"cursor_down"`); these
//! are resolved to [`Action`] via [`ActionRegistry::find_by_id`] at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionRegistry};
use crate::error::{CoreError, CoreResult};

/// Raw TOML representation, deserialized first and then resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawKeymap {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

/// Complete set of key bindings.
///
/// Stores bindings as a `HashMap<String, Action>` for O(1) lookup.
/// The default instance provides vim-style navigation plus arrow keys.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
    /// Reverse map: Action → list of key strings (for the help overlay).
    reverse: HashMap<Action, Vec<String>>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Navigation
        for (key, action) in [
            ("j", Action::CursorDown),
            ("Down", Action::CursorDown),
            ("k", Action::CursorUp),
            ("Up", Action::CursorUp),
            ("h", Action::CursorLeft),
            ("Left", Action::CursorLeft),
            ("l", Action::CursorRight),
            ("Right", Action::CursorRight),
            ("g", Action::CursorTop),
            ("Home", Action::CursorTop),
            ("G", Action::CursorBottom),
            ("End", Action::CursorBottom),
        ] {
            bindings.insert(key.to_string(), action);
        }

        // Rows and cells
        bindings.insert("a".to_string(), Action::AddRow);
        bindings.insert("d".to_string(), Action::DeleteRows);
        bindings.insert("Space".to_string(), Action::ToggleMark);
        bindings.insert("e".to_string(), Action::EditCell);
        bindings.insert("Enter".to_string(), Action::EditCell);

        // Index
        bindings.insert("s".to_string(), Action::Save);
        bindings.insert("r".to_string(), Action::Rescan);

        // System
        bindings.insert("?".to_string(), Action::Help);
        bindings.insert("q".to_string(), Action::Quit);

        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }
}

/// Builds the reverse mapping from Action → Vec<key string>.
fn build_reverse(bindings: &HashMap<String, Action>) -> HashMap<Action, Vec<String>> {
    let mut reverse: HashMap<Action, Vec<String>> = HashMap::new();
    for (key, action) in bindings {
        reverse.entry(*action).or_default().push(key.clone());
    }
    // Sort keys for deterministic display
    for keys in reverse.values_mut() {
        keys.sort();
    }
    reverse
}

impl Keymap {
    /// Loads key bindings from a TOML file at `path`.
    ///
    /// String action identifiers are resolved via `ActionRegistry`.
    /// Unknown action strings are silently ignored.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        let raw: RawKeymap =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    /// Converts a raw (string-based) keymap into a resolved one.
    fn from_raw(raw: RawKeymap) -> Self {
        let registry = ActionRegistry::new();
        let bindings: HashMap<String, Action> = raw
            .bindings
            .into_iter()
            .filter_map(|(key, action_id)| {
                registry.find_by_id(&action_id).map(|action| (key, action))
            })
            .collect();
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }

    /// Returns the action mapped to `key`, or `None` if unbound.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns the key(s) bound to a given action, sorted.
    pub fn keys_for_action(&self, action: Action) -> Option<&[String]> {
        self.reverse.get(&action).map(|v| v.as_slice())
    }

    /// Returns all bindings (for iteration / display).
    pub fn bindings(&self) -> &HashMap<String, Action> {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_keymap_has_navigation_keys() {
        let keymap = Keymap::default();

        assert_eq!(keymap.action_for_key("j"), Some(Action::CursorDown));
        assert_eq!(keymap.action_for_key("Down"), Some(Action::CursorDown));
        assert_eq!(keymap.action_for_key("k"), Some(Action::CursorUp));
        assert_eq!(keymap.action_for_key("h"), Some(Action::CursorLeft));
        assert_eq!(keymap.action_for_key("l"), Some(Action::CursorRight));
        assert_eq!(keymap.action_for_key("g"), Some(Action::CursorTop));
        assert_eq!(keymap.action_for_key("G"), Some(Action::CursorBottom));
    }

    #[test]
    fn default_keymap_has_row_and_cell_keys() {
        let keymap = Keymap::default();

        assert_eq!(keymap.action_for_key("a"), Some(Action::AddRow));
        assert_eq!(keymap.action_for_key("d"), Some(Action::DeleteRows));
        assert_eq!(keymap.action_for_key("Space"), Some(Action::ToggleMark));
        assert_eq!(keymap.action_for_key("e"), Some(Action::EditCell));
        assert_eq!(keymap.action_for_key("Enter"), Some(Action::EditCell));
    }

    #[test]
    fn default_keymap_has_index_and_system_keys() {
        let keymap = Keymap::default();

        assert_eq!(keymap.action_for_key("s"), Some(Action::Save));
        assert_eq!(keymap.action_for_key("r"), Some(Action::Rescan));
        assert_eq!(keymap.action_for_key("q"), Some(Action::Quit));
        assert_eq!(keymap.action_for_key("?"), Some(Action::Help));
    }

    #[test]
    fn action_for_unknown_key_returns_none() {
        let keymap = Keymap::default();
        assert_eq!(keymap.action_for_key("z"), None);
        assert_eq!(keymap.action_for_key(""), None);
        assert_eq!(keymap.action_for_key("Ctrl+X"), None);
    }

    #[test]
    fn load_custom_keymap() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(
            &path,
            r#"
[bindings]
n = "add_row"
x = "delete_rows"
Q = "quit"
"#,
        )
        .unwrap();

        let keymap = Keymap::load(&path).unwrap();

        assert_eq!(keymap.action_for_key("n"), Some(Action::AddRow));
        assert_eq!(keymap.action_for_key("x"), Some(Action::DeleteRows));
        assert_eq!(keymap.action_for_key("Q"), Some(Action::Quit));
        // a loaded file replaces the defaults
        assert_eq!(keymap.action_for_key("a"), None);
    }

    #[test]
    fn load_custom_keymap_ignores_unknown_actions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(
            &path,
            r#"
[bindings]
j = "cursor_down"
x = "nonexistent_action"
"#,
        )
        .unwrap();

        let keymap = Keymap::load(&path).unwrap();
        assert_eq!(keymap.action_for_key("j"), Some(Action::CursorDown));
        assert_eq!(keymap.action_for_key("x"), None);
    }

    #[test]
    fn load_empty_keymap_has_no_bindings() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(&path, "").unwrap();

        let keymap = Keymap::load(&path).unwrap();
        assert!(keymap.bindings().is_empty());
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Keymap::load(&tmp.path().join("nope.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(&path, "invalid[[[toml").unwrap();

        let result = Keymap::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn keys_for_action_are_sorted() {
        let keymap = Keymap::default();
        let keys = keymap.keys_for_action(Action::CursorDown).unwrap();
        assert_eq!(keys, ["Down".to_string(), "j".to_string()]);
    }

    #[test]
    fn keys_for_action_unbound_returns_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(&path, "[bindings]\nq = \"quit\"\n").unwrap();

        let keymap = Keymap::load(&path).unwrap();
        assert!(keymap.keys_for_action(Action::Save).is_none());
    }
}
