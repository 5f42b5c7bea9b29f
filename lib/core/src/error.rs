use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Matrix data length {len} does not match shape {rows}x{cols}")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },

    #[error("Row {row} has {actual} values, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Row {0} is not a JSON object")]
    NonObjectRow(usize),
}
