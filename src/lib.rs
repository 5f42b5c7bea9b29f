//! # Gusto
//!
//! A dish recommendation engine: dishes and users are described by
//! feature vectors over the same food-category space, projected into a
//! shared low-dimensional embedding by a truncated SVD, and ranked by
//! cosine distance.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cargo install gusto
//! gusto --dishes data/gastronomia.csv \
//!       --restaurants data/restaurantes.csv \
//!       --people data/personas.csv \
//!       --pref carnes=0.9 --pref pastas=0.2 --top-n 5
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use gusto::prelude::*;
//!
//! // Load the three catalog tables
//! let dishes = read_table("data/gastronomia.csv").unwrap();
//! let restaurants = read_table("data/restaurantes.csv").unwrap();
//! let people = read_table("data/personas.csv").unwrap();
//!
//! // Derive the schema from the dish table's category_* columns
//! let schema = FeatureSchema::from_table(&dishes).unwrap();
//! let catalog = CatalogStore::load(
//!     &schema,
//!     &CatalogColumns::default(),
//!     &dishes,
//!     &restaurants,
//!     &people,
//! )
//! .unwrap();
//!
//! // Fit once, query many
//! let engine = Recommender::new(catalog, &SvdConfig::default()).unwrap();
//! let picks = engine.recommend(&[0.9, 0.2, 0.5], DEFAULT_TOP_N).unwrap();
//! for pick in &picks {
//!     println!("{} - {:.3}", pick.dish_name, pick.similarity);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! Gusto is composed of several crates:
//!
//! - [`gusto-core`](https://docs.rs/gusto-core) - Vector, Matrix, and Table primitives
//! - [`gusto-schema`](https://docs.rs/gusto-schema) - Canonical category feature schema
//! - [`gusto-engine`](https://docs.rs/gusto-engine) - Catalog store, truncated SVD, ranking
//! - [`gusto-ingest`](https://docs.rs/gusto-ingest) - CSV to Table loading
//!
//! ## Features
//!
//! - **Schema-driven features**: one configurable category list instead of
//!   per-dataset code paths
//! - **Deterministic reduction**: seeded randomized truncated SVD, fit once
//!   per process
//! - **Cosine top-N ranking**: clamped to the catalog size, ties broken by
//!   catalog row order
//! - **Left-join metadata**: dishes without a restaurant row rank with a
//!   `None` restaurant, never an error

// Re-export core types
pub use gusto_core::{Error as CoreError, Matrix, Table, Vector};

// Re-export the schema layer
pub use gusto_schema::{FeatureSchema, SchemaError, CATEGORY_PREFIX};

// Re-export the engine
pub use gusto_engine::{
    CatalogColumns, CatalogStore, DataError, DimensionError, Dish, Error, ModelError, Person,
    Recommendation, Recommender, Restaurant, Result, SvdConfig, TruncatedSvd, DEFAULT_TOP_N,
};

// Re-export ingestion
pub use gusto_ingest::{read_table, IngestError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        read_table, CatalogColumns, CatalogStore, CoreError, DataError, DimensionError, Dish,
        Error, FeatureSchema, IngestError, Matrix, ModelError, Person, Recommendation,
        Recommender, Restaurant, Result, SchemaError, SvdConfig, Table, TruncatedSvd, Vector,
        CATEGORY_PREFIX, DEFAULT_TOP_N,
    };
}
