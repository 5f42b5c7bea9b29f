//! Query-time ranking
//!
//! Projects a user feature vector through the fitted reduction model and
//! ranks every dish embedding by cosine distance, closest first.

use gusto_core::Vector;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::BinaryHeap;
use tracing::{debug, info};

use crate::catalog::{CatalogStore, DataError};
use crate::error::{DimensionError, Result};
use crate::svd::{SvdConfig, TruncatedSvd};

/// Default number of recommendations per query.
pub const DEFAULT_TOP_N: usize = 5;

/// One ranked result row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    /// Catalog row index of the dish
    pub dish_index: usize,
    pub dish_name: String,
    /// `None` when the dish's establishment has no restaurant row
    pub restaurant_name: Option<String>,
    /// 1 − cosine distance, clamped into [0, 1]
    pub similarity: f32,
}

/// The recommendation engine: a fitted reduction model plus precomputed
/// dish embeddings over a read-only catalog.
///
/// Built once at startup. Queries take `&self` and the struct holds no
/// interior mutability, so one instance can be shared across threads
/// behind an `Arc` without locking.
#[derive(Debug)]
pub struct Recommender {
    catalog: CatalogStore,
    svd: TruncatedSvd,
    embeddings: Vec<Vector>,
}

impl Recommender {
    /// Fit the reduction model on the catalog feature matrix and
    /// precompute every dish embedding.
    ///
    /// # Errors
    ///
    /// `ModelError` when the configuration does not fit the catalog.
    pub fn new(catalog: CatalogStore, config: &SvdConfig) -> Result<Self> {
        let svd = TruncatedSvd::fit(catalog.feature_matrix(), config)?;
        let embedded = svd.transform(catalog.feature_matrix())?;
        let embeddings = (0..embedded.n_rows())
            .map(|i| Vector::from_slice(embedded.row(i)))
            .collect();

        info!(
            dishes = catalog.len(),
            features = catalog.feature_columns().len(),
            k = svd.n_components(),
            seed = config.seed,
            "recommender ready"
        );

        Ok(Self {
            catalog,
            svd,
            embeddings,
        })
    }

    /// Rank the catalog against an ad hoc feature vector.
    ///
    /// Returns the `top_n` closest dishes (clamped to the catalog size,
    /// never an error) ordered by ascending cosine distance, ties broken
    /// by catalog row order. A zero-magnitude query compares as wholly
    /// dissimilar to everything, so it still returns `top_n` rows with
    /// similarity 0 instead of failing.
    ///
    /// # Errors
    ///
    /// `DimensionError` if the vector length differs from the canonical
    /// feature count.
    pub fn recommend(&self, features: &[f32], top_n: usize) -> Result<Vec<Recommendation>> {
        if features.len() != self.svd.n_features() {
            return Err(DimensionError {
                expected: self.svd.n_features(),
                actual: features.len(),
            }
            .into());
        }
        let query = Vector::new(self.svd.transform_row(features)?);

        let limit = top_n.min(self.catalog.len());
        if limit == 0 {
            return Ok(Vec::new());
        }

        // Bounded max-heap over (distance, row): the root is the worst
        // kept candidate, and on distance ties the larger row index is
        // evicted first. Popping the sorted heap therefore yields
        // ascending distance with catalog-row-order ties.
        let mut heap: BinaryHeap<(OrderedFloat<f32>, usize)> =
            BinaryHeap::with_capacity(limit + 1);
        for (row, embedding) in self.embeddings.iter().enumerate() {
            let distance = query.cosine_distance(embedding);
            heap.push((OrderedFloat(distance), row));
            if heap.len() > limit {
                heap.pop();
            }
        }

        let results = heap
            .into_sorted_vec()
            .into_iter()
            .map(|(distance, row)| self.recommendation(row, distance.into_inner()))
            .collect();

        debug!(top_n, returned = limit, "query ranked");
        Ok(results)
    }

    /// Rank the catalog for a stored person profile.
    ///
    /// # Errors
    ///
    /// `DataError::PersonNotFound` when no profile carries `person_id`.
    pub fn recommend_for_person(
        &self,
        person_id: &str,
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        let person = self
            .catalog
            .person(person_id)
            .ok_or_else(|| DataError::PersonNotFound(person_id.to_string()))?;
        self.recommend(person.features.as_slice(), top_n)
    }

    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// The fitted reduction model.
    #[inline]
    #[must_use]
    pub fn model(&self) -> &TruncatedSvd {
        &self.svd
    }

    fn recommendation(&self, row: usize, distance: f32) -> Recommendation {
        let dish = self.catalog.dish(row);
        let restaurant_name = dish
            .and_then(|d| d.establishment_id.as_deref())
            .and_then(|id| self.catalog.restaurant_for(id))
            .map(|r| r.name.clone());

        Recommendation {
            dish_index: row,
            dish_name: dish.map(|d| d.name.clone()).unwrap_or_default(),
            restaurant_name,
            similarity: (1.0 - distance).clamp(0.0, 1.0),
        }
    }
}
