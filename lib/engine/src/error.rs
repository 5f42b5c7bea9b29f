use thiserror::Error;

use crate::catalog::DataError;
use crate::svd::ModelError;
use gusto_schema::SchemaError;

pub type Result<T> = std::result::Result<T, Error>;

/// Feature-vector length mismatch, detected at transform or query time.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid vector dimension: expected {expected}, got {actual}")]
pub struct DimensionError {
    pub expected: usize,
    pub actual: usize,
}

/// Any failure the engine can raise.
///
/// Each kind is raised synchronously by the call that detects it
/// (`load`, `fit`, or `recommend`) and never retried internally.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error(transparent)]
    Core(#[from] gusto_core::Error),
}
