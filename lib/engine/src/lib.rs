//! # Gusto Engine
//!
//! The recommendation core: validated catalog storage, a truncated-SVD
//! reduction model, and cosine-distance top-N ranking.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//! │ input tables │─────>│ CatalogStore │─────>│ Recommender  │
//! │ (3 datasets) │      │ validate +   │      │ fit + embed  │
//! └──────────────┘      │ build matrix │      │ once         │
//!                       └──────────────┘      └──────┬───────┘
//!                                                    │ per query
//!                                             ┌──────┴───────┐
//!                                             │ recommend(v) │
//!                                             │ ranked list  │
//!                                             └──────────────┘
//! ```
//!
//! The store and the fitted model are built once at startup and never
//! mutated afterwards; queries are pure, bounded, in-memory computations
//! over `&self`.

pub mod catalog;
pub mod error;
pub mod recommend;
pub mod svd;

pub use catalog::{CatalogColumns, CatalogStore, DataError, Dish, Person, Restaurant};
pub use error::{DimensionError, Error, Result};
pub use recommend::{Recommendation, Recommender, DEFAULT_TOP_N};
pub use svd::{ModelError, SvdConfig, TruncatedSvd};
