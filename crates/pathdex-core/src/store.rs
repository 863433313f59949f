//! Persisted index: a CSV file whose first record holds the headers.

use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};

use crate::error::{CoreError, CoreResult};
use crate::table::Table;

/// Default index file name, relative to the working directory.
pub const DEFAULT_INDEX_FILE: &str = "INDEX.csv";

/// Loads the index at `path`.
///
/// A missing or empty file yields a table with only the `Path` header.
/// Records are returned as stored; ragged rows are not padded here.
///
/// # Errors
///
/// [`CoreError::Storage`] if the file exists but cannot be read or is not
/// valid UTF-8 CSV.
pub fn load(path: &Path) -> CoreResult<Table> {
    if !path.exists() {
        tracing::debug!("no index at {}, starting empty", path.display());
        return Ok(Table::with_path_header());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| CoreError::storage(path, e))?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CoreError::storage(path, e))?;
        records.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }

    let mut records = records.into_iter();
    match records.next() {
        Some(headers) => Ok(Table::new(headers, records.collect())),
        None => Ok(Table::with_path_header()),
    }
}

/// Overwrites `path` with the headers followed by every row.
///
/// # Errors
///
/// [`CoreError::Storage`] on any write failure, including a missing parent
/// directory.
pub fn save(path: &Path, table: &Table) -> CoreResult<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_path(path)
        .map_err(|e| CoreError::storage(path, e))?;

    writer
        .write_record(table.headers())
        .map_err(|e| CoreError::storage(path, e))?;
    for row in table.rows() {
        writer
            .write_record(row)
            .map_err(|e| CoreError::storage(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| CoreError::storage(path, csv::Error::from(e)))?;

    tracing::info!("saved {} rows to {}", table.row_count(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn load_missing_file_synthesizes_path_header() {
        let tmp = TempDir::new().unwrap();
        let table = load(&tmp.path().join("INDEX.csv")).unwrap();
        assert_eq!(table.headers(), strings(&["Path"]).as_slice());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn load_empty_file_synthesizes_path_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("INDEX.csv");
        fs::write(&path, "").unwrap();
        let table = load(&path).unwrap();
        assert_eq!(table, Table::with_path_header());
    }

    #[test]
    fn load_splits_headers_and_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("INDEX.csv");
        fs::write(&path, "Name,path\r\nalpha,code/a.txt\r\nbeta,code/b.txt\r\n").unwrap();

        let table = load(&path).unwrap();
        assert_eq!(table.headers(), strings(&["Name", "path"]).as_slice());
        assert_eq!(
            table.rows(),
            &[strings(&["alpha", "code/a.txt"]), strings(&["beta", "code/b.txt"])]
        );
    }

    #[test]
    fn load_keeps_ragged_rows_unpadded() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("INDEX.csv");
        fs::write(&path, "A,B,C\nonly\n1,2,3,4\n").unwrap();

        let table = load(&path).unwrap();
        assert_eq!(table.rows()[0], strings(&["only"]));
        assert_eq!(table.rows()[1], strings(&["1", "2", "3", "4"]));
    }

    #[test]
    fn save_then_load_preserves_special_characters() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("INDEX.csv");
        let table = Table::new(
            strings(&["Path", "Note"]),
            vec![strings(&["code/a,b.txt", "said \"hi\"\nthen left"])],
        );

        save(&path, &table).unwrap();
        assert_eq!(load(&path).unwrap(), table);
    }

    #[test]
    fn save_uses_minimal_quoting_and_crlf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("INDEX.csv");
        let table = Table::new(
            strings(&["Path", "Note"]),
            vec![strings(&["code/a.txt", "x,y"])],
        );

        save(&path, &table).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Path,Note\r\ncode/a.txt,\"x,y\"\r\n"
        );
    }

    #[test]
    fn save_overwrites_previous_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("INDEX.csv");
        fs::write(&path, "Old,Header\n1,2\n3,4\n5,6\n").unwrap();

        save(&path, &Table::with_path_header()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Path\r\n");
    }

    #[test]
    fn save_into_missing_directory_is_storage_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("INDEX.csv");
        let err = save(&path, &Table::with_path_header()).unwrap_err();
        assert!(matches!(err, CoreError::Storage { .. }));
    }

    #[test]
    fn load_invalid_utf8_is_storage_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("INDEX.csv");
        fs::write(&path, b"Path\n\xff\xfe\n").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, CoreError::Storage { .. }));
    }
}
