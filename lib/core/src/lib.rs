//! # Gusto Core
//!
//! Core library for the gusto recommendation engine.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`Vector`] - Dense vector with cosine similarity
//! - [`Matrix`] - Row-major dense matrix
//! - [`Table`] - Ordered columns over JSON object rows
//!
//! ## Example
//!
//! ```rust
//! use gusto_core::{Matrix, Vector};
//!
//! let profile = Vector::new(vec![1.0, 0.0, 0.5]);
//! let dish = Vector::new(vec![0.9, 0.1, 0.5]);
//! let similarity = profile.cosine_similarity(&dish);
//! assert!(similarity > 0.9);
//!
//! let features = Matrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
//! assert_eq!(features.shape(), (2, 2));
//! ```

pub mod error;
pub mod matrix;
pub mod table;
pub mod vector;

pub use error::{Error, Result};
pub use matrix::Matrix;
pub use table::Table;
pub use vector::Vector;
