//! # Gusto Schema
//!
//! Category feature schema for the gusto recommendation engine.
//!
//! ## Overview
//!
//! Dishes and user profiles are described by feature vectors over the
//! same ordered set of food categories. Category columns carry a
//! `category_` name prefix after normalization; raw headers and display
//! labels both resolve to those canonical names through the schema.
//!
//! The schema is configuration-supplied: declare the category list (or
//! derive it from a dish table) instead of hardcoding one per dataset.
//!
//! ## Example
//!
//! ```rust
//! use gusto_schema::FeatureSchema;
//!
//! let schema = FeatureSchema::new(["vegetariano", "carnes", "pastas"])
//!     .unwrap()
//!     .with_display_label("vegetariano", "Vegetariano")
//!     .unwrap();
//!
//! assert_eq!(schema.canonicalize("  carnes ").unwrap(), "category_carnes");
//! assert_eq!(
//!     schema.canonical_feature("Vegetariano"),
//!     Some("category_vegetariano"),
//! );
//! ```

pub mod schema;

pub use schema::{FeatureSchema, SchemaError, CATEGORY_PREFIX};
