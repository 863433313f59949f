//! In-memory table model: headers, rows and the path column.

use std::collections::HashSet;

/// Canonical name of the identity column.
pub const PATH_HEADER: &str = "Path";

/// An ordered header row plus ordered data rows of string cells.
///
/// Rows are not forced to header width on construction; ragged rows coming
/// from legacy data are only fixed by [`Table::normalize_rows`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// A table holding only the synthesized `Path` header.
    pub fn with_path_header() -> Self {
        Self::new(vec![PATH_HEADER.to_string()], Vec::new())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.headers, self.rows)
    }

    /// Returns the cell at `(row, column)`, if both are in range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    pub(crate) fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut String> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(column))
    }

    /// Index of the first header equal to `"path"` after trimming, ignoring case.
    pub fn find_path_column(&self) -> Option<usize> {
        self.headers.iter().position(|h| is_path_header(h))
    }

    /// Guarantees a canonical `Path` column and returns its index.
    ///
    /// The first matching header is renamed in place; otherwise `Path` is
    /// appended. Later matching headers get a numbered suffix (`PATH (2)`)
    /// so exactly one column matches afterwards; their cells are kept.
    /// Rows are left untouched, so call [`Table::normalize_rows`] afterwards.
    pub fn ensure_path_column(&mut self) -> usize {
        let idx = match self.find_path_column() {
            Some(idx) => {
                self.headers[idx] = PATH_HEADER.to_string();
                idx
            }
            None => {
                self.headers.push(PATH_HEADER.to_string());
                return self.headers.len() - 1;
            }
        };

        let mut suffix = 2;
        for pos in idx + 1..self.headers.len() {
            if !is_path_header(&self.headers[pos]) {
                continue;
            }
            let base = self.headers[pos].trim().to_string();
            let renamed = loop {
                let candidate = format!("{base} ({suffix})");
                suffix += 1;
                if !self.headers.contains(&candidate) {
                    break candidate;
                }
            };
            tracing::debug!("renaming duplicate path header {base:?} to {renamed:?}");
            self.headers[pos] = renamed;
        }
        idx
    }

    /// Pads short rows with empty cells and drops cells past the header width.
    pub fn normalize_rows(&mut self) {
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }

    /// Every value in `column`, for duplicate checks.
    pub fn path_set(&self, column: usize) -> HashSet<String> {
        self.rows
            .iter()
            .filter_map(|row| row.get(column).cloned())
            .collect()
    }

    /// Appends a row of empty cells and returns its index.
    pub fn push_empty_row(&mut self) -> usize {
        self.rows.push(vec![String::new(); self.headers.len()]);
        self.rows.len() - 1
    }

    /// Appends an empty row with `value` in `column`.
    pub fn push_path_row(&mut self, column: usize, value: String) {
        let mut row = vec![String::new(); self.headers.len()];
        row[column] = value;
        self.rows.push(row);
    }

    /// Removes the rows at `positions`, ignoring duplicates and out-of-range
    /// entries. Returns the removed positions in ascending order.
    pub fn remove_rows(&mut self, positions: &[usize]) -> Vec<usize> {
        let mut doomed: Vec<usize> = positions
            .iter()
            .copied()
            .filter(|&p| p < self.rows.len())
            .collect();
        doomed.sort_unstable();
        doomed.dedup();

        for &p in doomed.iter().rev() {
            self.rows.remove(p);
        }
        doomed
    }
}

fn is_path_header(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case("path")
}
