//! # Gusto Ingest
//!
//! CSV loading collaborator: reads a delimited file into a
//! [`Table`](gusto_core::Table) with cleaned-up headers and typed cells.
//!
//! Headers are trimmed and internal whitespace runs collapse to `_`, so
//! raw exports like `category carnes` arrive as `category_carnes`. Cells
//! that parse as numbers become JSON numbers, empty cells become null,
//! and everything else stays text.

use gusto_core::Table;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors raised while reading an input file
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File has no header row")]
    Empty,

    #[error("Duplicate column after normalization: {0}")]
    DuplicateColumn(String),

    #[error(transparent)]
    Core(#[from] gusto_core::Error),
}

/// Read a CSV file into a [`Table`].
///
/// # Errors
///
/// `IngestError` when the file cannot be read or parsed, has no header
/// row, or two headers collide after normalization.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestError::Empty);
    }

    let mut columns = Vec::with_capacity(headers.len());
    for header in headers.iter() {
        let name = normalize_header(header);
        if columns.contains(&name) {
            return Err(IngestError::DuplicateColumn(name));
        }
        columns.push(name);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = serde_json::Map::with_capacity(columns.len());
        for (column, cell) in columns.iter().zip(record.iter()) {
            row.insert(column.clone(), parse_cell(cell));
        }
        rows.push(Value::Object(row));
    }

    debug!(
        path = %path.display(),
        columns = columns.len(),
        rows = rows.len(),
        "table read"
    );

    Ok(Table::new(columns, rows)?)
}

/// Trim and collapse internal whitespace runs to `_`.
fn normalize_header(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Numbers parse as numbers, empty cells are null, the rest stays text.
/// Non-finite parses ("NaN", "inf") stay text since JSON cannot carry
/// them.
fn parse_cell(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(cell.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_table_normalizes_and_infers() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, " Name , EstablishmentId ,category carnes").expect("write header");
        writeln!(file, "Bife de chorizo,1,0.8").expect("write row");
        writeln!(file, "Tagliatelle,2,").expect("write row");

        let table = read_table(file.path()).expect("read CSV");

        assert_eq!(
            table.columns(),
            &[
                "Name".to_string(),
                "EstablishmentId".to_string(),
                "category_carnes".to_string(),
            ]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.text(0, "Name"), Some("Bife de chorizo"));
        assert_eq!(table.number(0, "EstablishmentId"), Some(1.0));
        assert_eq!(table.number(0, "category_carnes"), Some(0.8));
        assert_eq!(table.value(1, "category_carnes"), Some(&Value::Null));
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "a b,a_b").expect("write header");
        writeln!(file, "1,2").expect("write row");

        let err = read_table(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::DuplicateColumn(c) if c == "a_b"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_table("/no/such/file.csv").unwrap_err();
        assert!(matches!(err, IngestError::Csv(_)));
    }

    #[test]
    fn test_nan_stays_text() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "value").expect("write header");
        writeln!(file, "NaN").expect("write row");

        let table = read_table(file.path()).expect("read CSV");
        assert_eq!(table.text(0, "value"), Some("NaN"));
        assert_eq!(table.number(0, "value"), None);
    }

    #[test]
    fn test_ragged_row_is_a_csv_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "a,b").expect("write header");
        writeln!(file, "1").expect("write row");

        let err = read_table(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::Csv(_)));
    }
}
