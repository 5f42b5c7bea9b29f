use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A 2D matrix of f32 values with row-major storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a matrix from flat row-major data.
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if data length is not rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix from a sequence of equally sized rows.
    ///
    /// # Errors
    ///
    /// Returns `Error::RaggedRow` if row lengths differ.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::RaggedRow {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Create a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Shape as (rows, cols).
    #[inline]
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    /// Set element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.cols + col] = value;
    }

    /// A single row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if the row index is out of bounds.
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// The underlying row-major data.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
