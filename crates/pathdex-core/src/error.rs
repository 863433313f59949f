//! Error types for `pathdex-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.
//!
//! Classification failures (unreadable file, invalid UTF-8 prefix) are never
//! errors: the classifier answers "not text" and the scan moves on.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The index file could not be read or written.
    #[error("index storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Creating the file or directory named by a path cell failed.
    #[error("cannot materialize {path}: {source}")]
    Materialize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A scanned file does not live under the index root.
    #[error("path is outside the index root: {0}")]
    OutsideRoot(PathBuf),

    /// A row/column pair does not address an existing cell.
    #[error("no cell at row {row}, column {column}")]
    CellOutOfRange { row: usize, column: usize },

    /// The operation requires the session to be idle.
    #[error("a cell edit is in progress")]
    EditInProgress,

    /// Commit or cancel was requested with no active edit.
    #[error("no cell is being edited")]
    NoActiveEdit,

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Wraps a csv error raised while touching the index at `path`.
    pub(crate) fn storage(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout `pathdex-core`.
pub type CoreResult<T> = Result<T, CoreError>;
