//! pathdex core library: UI-agnostic logic for a CSV index of files.
//!
//! `pathdex-core` keeps a table (`INDEX.csv`) whose `Path` column lists text
//! files under a scan directory. It can merge newly found files into that
//! table, and it drives an edit session in which committing a path cell
//! creates the named directory or empty file. Nothing here depends on a
//! terminal, so the TUI (`pathdex-tui`) and the `reindex` binary share it.
//!
//! # Modules
//!
//! - [`table`]: the in-memory table and its `Path` column helpers.
//! - [`store`]: CSV load/save for the index file.
//! - [`fs`]: text classification and path materialization.
//! - [`reconcile`]: append-only merge of scanned files into a table.
//! - [`session`]: the interactive edit session ([`EditSession`]).
//! - [`config`]: TOML settings, theme and key bindings.
//! - [`event`]: command and event types for UI ↔ Core communication.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod table;

pub use error::{CoreError, CoreResult};
pub use event::{Command, Event};
pub use reconcile::{reconcile, reindex, Reconciled, Scan, DEFAULT_SCAN_DIR};
pub use session::{ActiveEdit, EditSession, EditState};
pub use store::DEFAULT_INDEX_FILE;
pub use table::{Table, PATH_HEADER};

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use config::keymap::Keymap;
pub use config::settings::Config;
pub use config::theme::{parse_color, Theme};
pub use fs::{FileSystem, Sniff, WorkingDirFs};
