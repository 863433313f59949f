//! Merging newly discovered text files into the index.
//!
//! Reconciliation is a one-way, append-only merge: existing rows keep their
//! order and every cell, and files already listed are never added twice.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CoreError, CoreResult};
use crate::fs::classify::{sniff_path, Sniff};
use crate::store;
use crate::table::Table;

/// Default directory scanned for indexable files, relative to the root.
pub const DEFAULT_SCAN_DIR: &str = "code";

/// The result of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// The merged table, normalized to header width.
    pub table: Table,
    /// Index of the canonical `Path` column in `table`.
    pub path_column: usize,
    /// Root-relative paths appended by this pass, in walk order.
    pub added: Vec<String>,
    /// Files skipped because they did not classify as text.
    pub skipped_non_text: usize,
}

/// Text files found under a scan directory, as root-relative `/` paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Relative paths in walk order.
    pub paths: Vec<String>,
    /// Files skipped because they did not classify as text.
    pub skipped_non_text: usize,
}

/// Walks `scan_dir` and collects every text file, relative to `root`.
///
/// A missing `scan_dir` yields an empty scan. The table is not involved.
///
/// # Errors
///
/// [`CoreError::OutsideRoot`] if a scanned file is not under `root`.
pub fn scan(root: &Path, scan_dir: &Path) -> CoreResult<Scan> {
    let mut out = Scan::default();
    for file in collect_files(scan_dir) {
        match sniff_path(&file) {
            Sniff::Text => match relative_slash_path(root, &file)? {
                Some(rel) => out.paths.push(rel),
                None => tracing::warn!("skipping {}: path is not valid UTF-8", file.display()),
            },
            verdict => {
                tracing::debug!("skipping {} ({verdict:?})", file.display());
                out.skipped_non_text += 1;
            }
        }
    }
    Ok(out)
}

/// Appends the paths of `scan` that `table` does not list yet.
///
/// The `Path` column is located (or appended) and every row padded to the
/// header width first. Existing rows keep their order and content.
pub fn merge(mut table: Table, scan: Scan) -> Reconciled {
    let path_column = table.ensure_path_column();
    table.normalize_rows();
    let mut known = table.path_set(path_column);

    let mut added = Vec::new();
    for rel in scan.paths {
        if known.contains(&rel) {
            continue;
        }
        table.push_path_row(path_column, rel.clone());
        known.insert(rel.clone());
        added.push(rel);
    }

    tracing::info!(
        "merged scan: {} added, {} non-text skipped, {} rows total",
        added.len(),
        scan.skipped_non_text,
        table.row_count()
    );

    Reconciled {
        table,
        path_column,
        added,
        skipped_non_text: scan.skipped_non_text,
    }
}

/// Merges every text file under `scan_dir` into `table`.
///
/// Paths are stored relative to `root` with `/` separators. A missing
/// `scan_dir` contributes nothing.
///
/// # Errors
///
/// [`CoreError::OutsideRoot`] if a scanned file is not under `root`.
pub fn reconcile(root: &Path, scan_dir: &Path, table: Table) -> CoreResult<Reconciled> {
    let found = scan(root, scan_dir)?;
    Ok(merge(table, found))
}

/// Loads the index at `index_path`, reconciles `root/scan_dir` into it and
/// saves the result.
pub fn reindex(root: &Path, scan_dir: &Path, index_path: &Path) -> CoreResult<Reconciled> {
    let table = store::load(index_path)?;
    let reconciled = reconcile(root, &root.join(scan_dir), table)?;
    store::save(index_path, &reconciled.table)?;
    Ok(reconciled)
}

/// Every regular file under `dir` (symlinks followed for the file check),
/// sorted component-wise. Unreadable subdirectories are skipped.
fn collect_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::debug!("scan directory {} does not exist", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                tracing::warn!("skipping unreadable entry while scanning: {e}");
                None
            }
        })
        .filter(|e| e.path().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// `file` relative to `root` with `/` separators, or `None` when a component
/// is not valid UTF-8 and cannot be stored in the index faithfully.
fn relative_slash_path(root: &Path, file: &Path) -> CoreResult<Option<String>> {
    let rel = file
        .strip_prefix(root)
        .map_err(|_| CoreError::OutsideRoot(file.to_path_buf()))?;

    let mut parts = Vec::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            let Some(part) = part.to_str() else {
                return Ok(None);
            };
            parts.push(part);
        }
    }
    Ok(Some(parts.join("/")))
}
