use crate::error::{Error, Result};
use ahash::AHashMap;
use serde_json::Value;

/// An in-memory table: an ordered list of column names plus one JSON
/// object per row.
///
/// JSON objects do not preserve key order, so the column list is kept
/// explicitly. Cells are accessed by row index and column name; a cell
/// missing from its row object reads as absent.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    index: AHashMap<String, usize>,
    rows: Vec<Value>,
}

impl Table {
    /// Build a table from column names and object rows.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateColumn` on repeated column names and
    /// `Error::NonObjectRow` if any row is not a JSON object.
    pub fn new(columns: Vec<String>, rows: Vec<Value>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if index.insert(column.clone(), i).is_some() {
                return Err(Error::DuplicateColumn(column.clone()));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if !row.is_object() {
                return Err(Error::NonObjectRow(i));
            }
        }
        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    /// Column names in table order.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Raw cell value, if the row exists and the cell is present.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Cell as text. `None` for absent, null, or non-string cells.
    #[must_use]
    pub fn text(&self, row: usize, column: &str) -> Option<&str> {
        self.value(row, column).and_then(Value::as_str)
    }

    /// Cell as a number. `None` for absent, null, or non-numeric cells.
    #[must_use]
    pub fn number(&self, row: usize, column: &str) -> Option<f64> {
        self.value(row, column).and_then(Value::as_f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        Table::new(
            vec!["name".to_string(), "price".to_string()],
            vec![
                json!({"name": "Mortadella", "price": 1.79}),
                json!({"name": "Prosciutto", "price": 2.49}),
                json!({"name": "Nameless"}),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let t = sample();
        assert_eq!(t.len(), 3);
        assert_eq!(t.columns(), &["name".to_string(), "price".to_string()]);
        assert_eq!(t.text(0, "name"), Some("Mortadella"));
        assert_eq!(t.number(1, "price"), Some(2.49));
        assert_eq!(t.number(2, "price"), None);
        assert_eq!(t.text(0, "missing"), None);
    }

    #[test]
    fn test_has_column() {
        let t = sample();
        assert!(t.has_column("price"));
        assert!(!t.has_column("rating"));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = Table::new(vec!["a".to_string(), "a".to_string()], vec![]).unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(c) if c == "a"));
    }

    #[test]
    fn test_non_object_row_rejected() {
        let err = Table::new(vec!["a".to_string()], vec![json!({"a": 1}), json!([1, 2])])
            .unwrap_err();
        assert!(matches!(err, Error::NonObjectRow(1)));
    }

    #[test]
    fn test_number_not_coerced_from_text() {
        let t = Table::new(
            vec!["v".to_string()],
            vec![json!({"v": "0.5"})],
        )
        .unwrap();
        assert_eq!(t.number(0, "v"), None);
        assert_eq!(t.text(0, "v"), Some("0.5"));
    }
}
