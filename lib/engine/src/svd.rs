//! Truncated SVD reduction model
//!
//! Learns a fixed-rank linear projection from feature space to embedding
//! space and applies it to dish and query vectors. No centering is
//! applied; the decomposition runs on the raw feature matrix.
//!
//! The solver is a randomized truncated SVD (Halko-style range finder
//! with power iterations): a seeded Gaussian probe sketches the column
//! space, the sketch is orthonormalized by QR, and a small exact SVD
//! finishes the job. The seed fixes the solution, so fits are
//! reproducible.

use gusto_core::Matrix;
use nalgebra::{DMatrix, SVD};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

use crate::error::DimensionError;

/// Reduction model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SvdConfig {
    /// Embedding dimensionality
    pub n_components: usize,
    /// Extra random probes for the range finder
    pub n_oversamples: usize,
    /// Power iterations sharpening the range estimate
    pub n_iter: usize,
    /// Seed for the Gaussian probe; fixes the solution
    pub seed: u64,
}

impl Default for SvdConfig {
    fn default() -> Self {
        Self {
            n_components: 3,
            n_oversamples: 10,
            n_iter: 5,
            seed: 42,
        }
    }
}

/// Errors raised while fitting the reduction model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Cannot fit on an empty matrix")]
    EmptyMatrix,

    #[error("Component count must be at least 1")]
    ZeroComponents,

    #[error("Requested {requested} components but the matrix has {features} feature columns")]
    TooManyComponents { requested: usize, features: usize },

    #[error("Matrix rank {rank} is below the requested {requested} components")]
    RankDeficient { rank: usize, requested: usize },

    #[error("Singular value decomposition did not converge")]
    Decomposition,
}

/// A fitted truncated SVD.
///
/// `components` holds the top right-singular vectors (one per row);
/// `transform` projects feature vectors as X · Vᵀ.
#[derive(Debug, Clone)]
pub struct TruncatedSvd {
    components: Matrix,
    singular_values: Vec<f32>,
    n_features: usize,
}

impl TruncatedSvd {
    /// Fit the model on a feature matrix.
    ///
    /// # Errors
    ///
    /// `ModelError` when the matrix is empty, the component count is
    /// zero or exceeds the feature count, the matrix rank is below the
    /// component count, or the decomposition fails.
    pub fn fit(matrix: &Matrix, config: &SvdConfig) -> Result<Self, ModelError> {
        let (rows, cols) = matrix.shape();
        if rows == 0 || cols == 0 {
            return Err(ModelError::EmptyMatrix);
        }
        if config.n_components == 0 {
            return Err(ModelError::ZeroComponents);
        }
        if config.n_components > cols {
            return Err(ModelError::TooManyComponents {
                requested: config.n_components,
                features: cols,
            });
        }

        let a = DMatrix::from_row_slice(rows, cols, matrix.as_slice());

        // Range finder: sketch the column space with a seeded Gaussian
        // probe, then sharpen it with alternating power iterations.
        let sketch = (config.n_components + config.n_oversamples)
            .min(cols)
            .min(rows);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let probe: Vec<f32> = (0..cols * sketch).map(|_| rng.sample(StandardNormal)).collect();
        let omega = DMatrix::from_row_slice(cols, sketch, &probe);

        let mut q = orthonormalize(&a * &omega);
        for _ in 0..config.n_iter {
            let z = orthonormalize(a.transpose() * &q);
            q = orthonormalize(&a * &z);
        }

        // Project into the sketched subspace and decompose exactly there.
        let b = q.transpose() * &a;
        let svd = SVD::new(b, false, true);
        let v_t = svd.v_t.ok_or(ModelError::Decomposition)?;
        let singular = svd.singular_values;

        let mut order: Vec<usize> = (0..singular.len()).collect();
        order.sort_by(|&i, &j| {
            singular[j]
                .partial_cmp(&singular[i])
                .unwrap_or(Ordering::Equal)
        });

        let tolerance = singular.max() * rows.max(cols) as f32 * f32::EPSILON;
        let rank = singular.iter().filter(|s| **s > tolerance).count();
        if rank < config.n_components {
            return Err(ModelError::RankDeficient {
                rank,
                requested: config.n_components,
            });
        }

        let mut components = vec![0.0f32; config.n_components * cols];
        let mut singular_values = Vec::with_capacity(config.n_components);
        for (c, &idx) in order.iter().take(config.n_components).enumerate() {
            singular_values.push(singular[idx]);
            for j in 0..cols {
                components[c * cols + j] = v_t[(idx, j)];
            }
        }

        // Sign convention: the largest-magnitude loading of each component
        // is made positive, so equivalent fits agree exactly.
        for c in 0..config.n_components {
            let row = &mut components[c * cols..(c + 1) * cols];
            let mut pivot = 0;
            for j in 1..cols {
                if row[j].abs() > row[pivot].abs() {
                    pivot = j;
                }
            }
            if row[pivot] < 0.0 {
                for value in row.iter_mut() {
                    *value = -*value;
                }
            }
        }

        let components = Matrix::from_vec(config.n_components, cols, components)
            .map_err(|_| ModelError::Decomposition)?;

        debug!(
            rows,
            cols,
            k = config.n_components,
            seed = config.seed,
            "reduction model fitted"
        );

        Ok(Self {
            components,
            singular_values,
            n_features: cols,
        })
    }

    /// Project a matrix of feature rows into embedding space.
    ///
    /// # Errors
    ///
    /// `DimensionError` if the input width differs from the fitted
    /// feature count.
    pub fn transform(&self, matrix: &Matrix) -> Result<Matrix, DimensionError> {
        let (rows, cols) = matrix.shape();
        if cols != self.n_features {
            return Err(DimensionError {
                expected: self.n_features,
                actual: cols,
            });
        }

        let k = self.n_components();
        let mut out = Matrix::zeros(rows, k);
        for i in 0..rows {
            let row = matrix.row(i);
            for c in 0..k {
                let component = self.components.row(c);
                let mut sum = 0.0;
                for j in 0..cols {
                    sum += row[j] * component[j];
                }
                out.set(i, c, sum);
            }
        }
        Ok(out)
    }

    /// Project a single feature vector.
    ///
    /// # Errors
    ///
    /// `DimensionError` if the input length differs from the fitted
    /// feature count.
    pub fn transform_row(&self, features: &[f32]) -> Result<Vec<f32>, DimensionError> {
        if features.len() != self.n_features {
            return Err(DimensionError {
                expected: self.n_features,
                actual: features.len(),
            });
        }

        let mut out = Vec::with_capacity(self.n_components());
        for c in 0..self.n_components() {
            let component = self.components.row(c);
            out.push(
                features
                    .iter()
                    .zip(component)
                    .map(|(x, w)| x * w)
                    .sum::<f32>(),
            );
        }
        Ok(out)
    }

    /// Right-singular vectors, one component per row.
    #[inline]
    #[must_use]
    pub fn components(&self) -> &Matrix {
        &self.components
    }

    /// Singular values in descending order.
    #[inline]
    #[must_use]
    pub fn singular_values(&self) -> &[f32] {
        &self.singular_values
    }

    #[inline]
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.components.n_rows()
    }

    /// Feature count the model was fitted on.
    #[inline]
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

fn orthonormalize(m: DMatrix<f32>) -> DMatrix<f32> {
    m.qr().q()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gusto_core::Vector;

    fn sample_matrix() -> Matrix {
        Matrix::from_rows(&[
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_fit_recovers_known_spectrum() {
        // Gram matrix of the sample is I + ones(3), eigenvalues 4, 1, 1,
        // so the singular values are 2, 1, 1.
        let svd = TruncatedSvd::fit(&sample_matrix(), &SvdConfig::default()).unwrap();
        let sv = svd.singular_values();
        assert!((sv[0] - 2.0).abs() < 1e-4);
        assert!((sv[1] - 1.0).abs() < 1e-4);
        assert!((sv[2] - 1.0).abs() < 1e-4);

        // Top component is the all-ones direction, sign-flipped positive.
        let top = svd.components().row(0);
        let expected = 1.0 / 3.0_f32.sqrt();
        for value in top {
            assert!((value - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_full_rank_projection_preserves_geometry() {
        // k = feature count makes V orthogonal, so angles and norms
        // survive the projection.
        let svd = TruncatedSvd::fit(&sample_matrix(), &SvdConfig::default()).unwrap();
        let embedded = svd.transform(&sample_matrix()).unwrap();

        let query = Vector::new(svd.transform_row(&[1.0, 0.0, 0.0]).unwrap());
        let first = Vector::from_slice(embedded.row(0));
        let last = Vector::from_slice(embedded.row(3));

        assert!((query.cosine_similarity(&first) - 1.0).abs() < 1e-4);
        assert!((query.cosine_similarity(&last) - 1.0 / 3.0_f32.sqrt()).abs() < 1e-4);

        let norm: f32 = query.as_slice().iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_deterministic_fit() {
        let config = SvdConfig::default();
        let a = TruncatedSvd::fit(&sample_matrix(), &config).unwrap();
        let b = TruncatedSvd::fit(&sample_matrix(), &config).unwrap();

        for (x, y) in a
            .components()
            .as_slice()
            .iter()
            .zip(b.components().as_slice())
        {
            assert!((x - y).abs() < 1e-9);
        }
        for (x, y) in a.singular_values().iter().zip(b.singular_values()) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let empty = Matrix::from_rows(&[]).unwrap();
        assert!(matches!(
            TruncatedSvd::fit(&empty, &SvdConfig::default()),
            Err(ModelError::EmptyMatrix)
        ));
    }

    #[test]
    fn test_component_count_validation() {
        let zero = SvdConfig {
            n_components: 0,
            ..SvdConfig::default()
        };
        assert!(matches!(
            TruncatedSvd::fit(&sample_matrix(), &zero),
            Err(ModelError::ZeroComponents)
        ));

        let wide = SvdConfig {
            n_components: 4,
            ..SvdConfig::default()
        };
        assert!(matches!(
            TruncatedSvd::fit(&sample_matrix(), &wide),
            Err(ModelError::TooManyComponents {
                requested: 4,
                features: 3
            })
        ));
    }

    #[test]
    fn test_rank_deficient_rejected() {
        let flat = Matrix::from_rows(&[vec![1.0, 1.0], vec![2.0, 2.0]]).unwrap();
        let config = SvdConfig {
            n_components: 2,
            ..SvdConfig::default()
        };
        assert!(matches!(
            TruncatedSvd::fit(&flat, &config),
            Err(ModelError::RankDeficient {
                rank: 1,
                requested: 2
            })
        ));
    }

    #[test]
    fn test_transform_dimension_mismatch() {
        let svd = TruncatedSvd::fit(&sample_matrix(), &SvdConfig::default()).unwrap();
        let err = svd.transform_row(&[1.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            DimensionError {
                expected: 3,
                actual: 2
            }
        );
    }
}
