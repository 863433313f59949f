//! Text/binary classification for indexing.
//!
//! Only a fixed-size prefix is inspected: a NUL byte marks the file as
//! binary, and the prefix must otherwise be valid UTF-8.

use std::fs;
use std::io::Read;
use std::path::Path;

/// The number of bytes inspected per file.
pub const SNIFF_LIMIT: usize = 8192;

/// The outcome of inspecting a file prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sniff {
    /// Valid UTF-8 with no NUL bytes.
    Text,
    /// Contains at least one NUL byte.
    Binary,
    /// No NUL bytes, but not valid UTF-8.
    InvalidUtf8,
    /// The file could not be opened or read.
    Unreadable,
}

impl Sniff {
    pub fn is_text(self) -> bool {
        self == Self::Text
    }
}

/// Classifies the first [`SNIFF_LIMIT`] bytes produced by `reader`.
///
/// A multibyte character split by the prefix boundary counts as invalid.
pub fn sniff<R: Read>(reader: R) -> Sniff {
    let mut buf = Vec::with_capacity(SNIFF_LIMIT);
    if reader.take(SNIFF_LIMIT as u64).read_to_end(&mut buf).is_err() {
        return Sniff::Unreadable;
    }
    if buf.contains(&0) {
        return Sniff::Binary;
    }
    match std::str::from_utf8(&buf) {
        Ok(_) => Sniff::Text,
        Err(_) => Sniff::InvalidUtf8,
    }
}

/// Classifies the file at `path`.
pub fn sniff_path(path: &Path) -> Sniff {
    match fs::File::open(path) {
        Ok(file) => sniff(file),
        Err(e) => {
            tracing::debug!("cannot open {} for sniffing: {e}", path.display());
            Sniff::Unreadable
        }
    }
}

/// Returns `true` if the file at `path` should be indexed as text.
///
/// Fails closed: anything unreadable is not text.
pub fn is_text(path: &Path) -> bool {
    sniff_path(path).is_text()
}
