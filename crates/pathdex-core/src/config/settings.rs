//! Application configuration loaded from a TOML file.
//!
//! Every field has a default, so pathdex works without a config file and a
//! partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::theme::Theme;
use crate::error::{CoreError, CoreResult};
use crate::reconcile::DEFAULT_SCAN_DIR;
use crate::store::DEFAULT_INDEX_FILE;

/// Top-level application configuration.
///
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub theme: Theme,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
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
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Loads `path`, falling back to defaults when the file is missing.
    ///
    /// Parse and permission errors are still reported.
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        match Self::load(path) {
            Err(CoreError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }
}

/// Where the index lives and what gets scanned into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Index file, relative to the working directory.
    #[serde(default = "default_index_file")]
    pub file: PathBuf,
    /// Directory scanned by reindex/rescan, relative to the working directory.
    #[serde(default = "default_scan_dir")]
    pub scan_dir: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            file: default_index_file(),
            scan_dir: default_scan_dir(),
        }
    }
}

/// Table view preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_column_width")]
    pub column_width: u16,
    #[serde(default = "default_true")]
    pub show_row_numbers: bool,
    #[serde(default = "default_true")]
    pub confirm_quit_unsaved: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            column_width: default_column_width(),
            show_row_numbers: true,
            confirm_quit_unsaved: true,
        }
    }
}

/// Log output for the binaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// File the TUI logs to; the terminal itself is owned by the UI.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
    /// Maximum level: `error`, `warn`, `info`, `debug` or `trace`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    /// The configured level, or `INFO` for unrecognised values.
    pub fn level_filter(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }
}

fn default_index_file() -> PathBuf {
    PathBuf::from(DEFAULT_INDEX_FILE)
}

fn default_scan_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SCAN_DIR)
}

fn default_column_width() -> u16 {
    24
}

fn default_true() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from("/tmp/pathdex.log")
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_index() {
        let config = Config::default();
        assert_eq!(config.index.file, PathBuf::from("INDEX.csv"));
        assert_eq!(config.index.scan_dir, PathBuf::from("code"));
    }

    #[test]
    fn default_config_ui() {
        let config = Config::default();
        assert_eq!(config.ui.column_width, 24);
        assert!(config.ui.show_row_numbers);
        assert!(config.ui.confirm_quit_unsaved);
    }

    #[test]
    fn default_config_log() {
        let config = Config::default();
        assert_eq!(config.log.file, PathBuf::from("/tmp/pathdex.log"));
        assert_eq!(config.log.level_filter(), tracing::Level::INFO);
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"
[index]
file = "catalog/INDEX.csv"
scan_dir = "src"

[ui]
column_width = 40
show_row_numbers = false
confirm_quit_unsaved = false

[log]
file = "pathdex.log"
level = "debug"

[theme.table]
header_fg = "#00ff00"
"##,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.index.file, PathBuf::from("catalog/INDEX.csv"));
        assert_eq!(config.index.scan_dir, PathBuf::from("src"));
        assert_eq!(config.ui.column_width, 40);
        assert!(!config.ui.show_row_numbers);
        assert!(!config.ui.confirm_quit_unsaved);
        assert_eq!(config.log.file, PathBuf::from("pathdex.log"));
        assert_eq!(config.log.level_filter(), tracing::Level::DEBUG);
        assert_eq!(config.theme.table.header_fg, "#00ff00");
        assert_eq!(config.theme.table.selected_fg, "yellow");
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[index]
scan_dir = "docs"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.index.scan_dir, PathBuf::from("docs"));
        assert_eq!(config.index.file, PathBuf::from("INDEX.csv"));
        assert_eq!(config.ui.column_width, 24);
    }

    #[test]
    fn load_empty_toml_uses_all_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        let default = Config::default();

        assert_eq!(config.index.file, default.index.file);
        assert_eq!(config.ui.column_width, default.ui.column_width);
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(&tmp.path().join("nonexistent.toml")).unwrap();
        assert_eq!(config.index.file, PathBuf::from("INDEX.csv"));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[ui\ncolumn_width = ").unwrap();
        let result = Config::load_or_default(&path);
        assert!(matches!(result, Err(CoreError::ConfigParse(_))));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let log = LogConfig {
            level: "chatty".to_string(),
            ..LogConfig::default()
        };
        assert_eq!(log.level_filter(), tracing::Level::INFO);
    }
}
