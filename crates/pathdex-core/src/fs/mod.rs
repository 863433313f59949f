//! File system helpers for pathdex.
//!
//! [`classify`] decides whether a file counts as text, and [`materialize`]
//! turns committed path cells into directories or empty files through the
//! [`FileSystem`] trait.

pub mod classify;
pub mod materialize;

pub use classify::{is_text, sniff, sniff_path, Sniff, SNIFF_LIMIT};
pub use materialize::{FileSystem, FsAction, MaterializePlan, WorkingDirFs};
