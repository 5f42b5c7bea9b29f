//! Feature schema definitions
//!
//! Defines the canonical category feature space shared by dishes and
//! user profiles. The schema maps raw column names and display labels
//! to canonical `category_*` names and enumerates the feature columns
//! of a table in table order.

use gusto_core::Table;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name prefix that marks a column as a category feature.
pub const CATEGORY_PREFIX: &str = "category_";

/// Canonical category feature schema
///
/// Single source of truth for the ordered category list. Dish and user
/// vectors are only comparable when extracted through the same schema,
/// so all column-name resolution goes through here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureSchema {
    /// Canonical `category_*` names in declaration order
    categories: Vec<String>,

    /// Explicit display labels keyed by canonical name
    #[serde(default)]
    labels: HashMap<String, String>,
}

impl FeatureSchema {
    /// Create a schema from category names (bare or already prefixed).
    pub fn new<I, S>(categories: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = Self {
            categories: categories.into_iter().map(Into::into).collect(),
            labels: HashMap::new(),
        };
        schema.validate_and_normalize()?;
        Ok(schema)
    }

    /// Derive a schema from a table's `category_*` columns, in column order.
    pub fn from_table(table: &Table) -> Result<Self, SchemaError> {
        let categories: Vec<String> = table
            .columns()
            .iter()
            .filter(|c| normalize(c).starts_with(CATEGORY_PREFIX))
            .cloned()
            .collect();
        Self::new(categories)
    }

    /// Validate the schema and normalize category names to canonical form.
    ///
    /// Call this after deserializing a schema from a file; constructors
    /// run it automatically.
    pub fn validate_and_normalize(&mut self) -> Result<(), SchemaError> {
        if self.categories.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        let mut canonical = Vec::with_capacity(self.categories.len());
        for raw in &self.categories {
            let name = canonical_name(raw);
            if canonical.contains(&name) {
                return Err(SchemaError::DuplicateCategory(name));
            }
            canonical.push(name);
        }
        self.categories = canonical;

        // Label keys may be raw names in a hand-written schema file.
        let entries: Vec<(String, String)> = self.labels.drain().collect();
        let mut seen = Vec::with_capacity(entries.len());
        for (key, label) in entries {
            let category = canonical_name(&key);
            if !self.categories.contains(&category) {
                return Err(SchemaError::UnknownCategory(key));
            }
            let normalized = normalize(&label);
            if seen.contains(&normalized) {
                return Err(SchemaError::DuplicateLabel(label));
            }
            seen.push(normalized);
            self.labels.insert(category, label);
        }

        Ok(())
    }

    /// Attach a display label to a category.
    ///
    /// `category` may be a canonical name, a bare category name, or an
    /// existing label. Fails if the category is unknown or the label is
    /// already assigned to a different category.
    pub fn with_display_label(mut self, category: &str, label: &str) -> Result<Self, SchemaError> {
        let canonical = self
            .canonical_feature(category)
            .ok_or_else(|| SchemaError::UnknownCategory(category.to_string()))?
            .to_string();

        let normalized = normalize(label);
        if self
            .labels
            .iter()
            .any(|(cat, l)| cat != &canonical && normalize(l) == normalized)
        {
            return Err(SchemaError::DuplicateLabel(label.to_string()));
        }

        self.labels.insert(canonical, label.to_string());
        Ok(self)
    }

    /// Resolve a raw column name or display label to a known canonical
    /// name. Category names take precedence over display labels when a
    /// label collides with a category name.
    pub fn canonical_feature(&self, raw: &str) -> Option<&str> {
        let prefixed = canonical_name(raw);
        if let Some(category) = self.categories.iter().find(|c| **c == prefixed) {
            return Some(category.as_str());
        }

        let normalized = normalize(raw);
        self.labels
            .iter()
            .find(|(_, label)| normalize(label) == normalized)
            .map(|(category, _)| category.as_str())
    }

    /// Canonicalize a raw column name.
    ///
    /// Whitespace is trimmed and internal runs collapse to `_`. Known
    /// category names and display labels resolve to their canonical form;
    /// names already carrying the `category_` prefix pass through.
    ///
    /// # Errors
    ///
    /// `SchemaError::UnknownCategory` when the name maps to no known
    /// category and is not prefixed as a category feature.
    pub fn canonicalize(&self, raw: &str) -> Result<String, SchemaError> {
        if let Some(category) = self.canonical_feature(raw) {
            return Ok(category.to_string());
        }

        let normalized = normalize(raw);
        if normalized.starts_with(CATEGORY_PREFIX) {
            return Ok(normalized);
        }
        Err(SchemaError::UnknownCategory(raw.to_string()))
    }

    /// Every column of `table` that resolves to a schema category, as
    /// canonical names in table column order.
    #[must_use]
    pub fn feature_columns(&self, table: &Table) -> Vec<String> {
        table
            .columns()
            .iter()
            .filter_map(|c| self.canonical_feature(c))
            .map(str::to_string)
            .collect()
    }

    /// Human-readable label for a canonical name: the explicit mapping
    /// when one exists, otherwise the name with the prefix stripped.
    #[must_use]
    pub fn display_label(&self, canonical: &str) -> String {
        if let Some(label) = self.labels.get(canonical) {
            return label.clone();
        }
        canonical
            .strip_prefix(CATEGORY_PREFIX)
            .unwrap_or(canonical)
            .to_string()
    }

    /// Canonical category names in declaration order.
    #[inline]
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of categories.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Trim and collapse internal whitespace runs to `_`.
fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Normalized name with the category prefix guaranteed.
fn canonical_name(raw: &str) -> String {
    let normalized = normalize(raw);
    if normalized.starts_with(CATEGORY_PREFIX) {
        normalized
    } else {
        format!("{CATEGORY_PREFIX}{normalized}")
    }
}

/// Errors that can occur during schema construction or name resolution
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema has no categories")]
    EmptySchema,

    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Display label '{0}' is already assigned")]
    DuplicateLabel(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(["vegetariano", "carnes", "category_pastas"]).unwrap()
    }

    #[test]
    fn test_schema_creation() {
        let s = schema();
        assert_eq!(s.len(), 3);
        assert_eq!(
            s.categories(),
            &[
                "category_vegetariano".to_string(),
                "category_carnes".to_string(),
                "category_pastas".to_string(),
            ]
        );
    }

    #[test]
    fn test_canonicalize() {
        let s = schema();
        assert_eq!(s.canonicalize("  vegetariano ").unwrap(), "category_vegetariano");
        assert_eq!(s.canonicalize("category_pastas").unwrap(), "category_pastas");
        // Prefixed names pass through even when not declared.
        assert_eq!(s.canonicalize("category_nueva").unwrap(), "category_nueva");
        assert!(matches!(
            s.canonicalize("postres"),
            Err(SchemaError::UnknownCategory(c)) if c == "postres"
        ));
    }

    #[test]
    fn test_whitespace_normalization() {
        let s = FeatureSchema::new(["sin  gluten"]).unwrap();
        assert_eq!(s.categories(), &["category_sin_gluten".to_string()]);
        assert_eq!(s.canonicalize(" sin gluten ").unwrap(), "category_sin_gluten");
    }

    #[test]
    fn test_display_labels() {
        let s = schema().with_display_label("carnes", "Carnes Rojas").unwrap();
        assert_eq!(s.display_label("category_carnes"), "Carnes Rojas");
        assert_eq!(s.display_label("category_pastas"), "pastas");
        assert_eq!(s.canonical_feature("Carnes Rojas"), Some("category_carnes"));
    }

    #[test]
    fn test_category_name_beats_label() {
        // A label reusing another category's name resolves to the category.
        let s = schema().with_display_label("carnes", "vegetariano").unwrap();
        assert_eq!(s.canonical_feature("vegetariano"), Some("category_vegetariano"));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let s = schema().with_display_label("carnes", "Rico").unwrap();
        assert!(matches!(
            s.with_display_label("pastas", "Rico"),
            Err(SchemaError::DuplicateLabel(_))
        ));
    }

    #[test]
    fn test_feature_columns_in_table_order() {
        let table = Table::new(
            vec![
                "Name".to_string(),
                "category_pastas".to_string(),
                "EstablishmentId".to_string(),
                "category_carnes".to_string(),
                "category_postres".to_string(),
            ],
            vec![json!({"Name": "Tagliatelle"})],
        )
        .unwrap();

        let s = schema();
        assert_eq!(
            s.feature_columns(&table),
            vec!["category_pastas".to_string(), "category_carnes".to_string()]
        );
    }

    #[test]
    fn test_from_table() {
        let table = Table::new(
            vec![
                "Name".to_string(),
                "category_carnes".to_string(),
                "category_pastas".to_string(),
            ],
            vec![],
        )
        .unwrap();

        let s = FeatureSchema::from_table(&table).unwrap();
        assert_eq!(
            s.categories(),
            &["category_carnes".to_string(), "category_pastas".to_string()]
        );

        let empty = Table::new(vec!["Name".to_string()], vec![]).unwrap();
        assert!(matches!(
            FeatureSchema::from_table(&empty),
            Err(SchemaError::EmptySchema)
        ));
    }

    #[test]
    fn test_empty_schema_error() {
        assert!(matches!(
            FeatureSchema::new(Vec::<String>::new()),
            Err(SchemaError::EmptySchema)
        ));
    }

    #[test]
    fn test_duplicate_category_error() {
        assert!(matches!(
            FeatureSchema::new(["veg", "category_veg"]),
            Err(SchemaError::DuplicateCategory(c)) if c == "category_veg"
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let s = schema().with_display_label("carnes", "Carnes Rojas").unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let mut parsed: FeatureSchema = serde_json::from_str(&json).unwrap();
        parsed.validate_and_normalize().unwrap();
        assert_eq!(s, parsed);
    }
}
