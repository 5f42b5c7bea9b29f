use serde::{Deserialize, Serialize};

/// A dense vector of floating point numbers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Compute cosine similarity with another vector.
    ///
    /// Mismatched dimensions and zero-magnitude vectors compare as
    /// wholly dissimilar (similarity 0.0) rather than erroring, so a
    /// neutral all-zero query still ranks.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let norm_a = norm(&self.data);
        let norm_b = norm(&other.data);

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot(&self.data, &other.data) / (norm_a * norm_b)
    }

    /// Cosine distance: 1 minus cosine similarity.
    #[inline]
    pub fn cosine_distance(&self, other: &Vector) -> f32 {
        1.0 - self.cosine_similarity(other)
    }
}

/// Dot product of two equally sized slices
#[inline]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Euclidean (L2) norm of a slice
#[inline]
pub fn norm(a: &[f32]) -> f32 {
    a.iter().map(|x| x * x).sum::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = Vector::new(vec![1.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-6);

        let v3 = Vector::new(vec![1.0, 0.0]);
        let v4 = Vector::new(vec![0.0, 1.0]);
        assert!((v3.cosine_similarity(&v4) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_distance_complements_similarity() {
        let v1 = Vector::new(vec![1.0, 1.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0, 0.0]);
        let sim = v1.cosine_similarity(&v2);
        assert!((v1.cosine_distance(&v2) - (1.0 - sim)).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_is_dissimilar() {
        let zero = Vector::new(vec![0.0, 0.0, 0.0]);
        let v = Vector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(zero.cosine_similarity(&v), 0.0);
        assert_eq!(zero.cosine_distance(&v), 1.0);
    }

    #[test]
    fn test_dimension_mismatch_is_dissimilar() {
        let v1 = Vector::new(vec![1.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0, 0.0]);
        assert_eq!(v1.cosine_similarity(&v2), 0.0);
    }

    #[test]
    fn test_dot_and_norm() {
        assert!((dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]) - 32.0).abs() < 1e-6);
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-6);
    }
}
