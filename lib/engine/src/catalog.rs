//! Catalog storage
//!
//! Validates the three input tables (dishes, restaurants, people) against
//! a [`FeatureSchema`] and holds the schema-aligned result: the dish
//! feature matrix plus metadata, the restaurant lookup, and stored person
//! profiles. Built once, read-only afterwards.

use ahash::AHashMap;
use gusto_core::{Matrix, Table, Vector};
use gusto_schema::FeatureSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::error::Result;

/// Column names the input tables are expected to carry.
///
/// Defaults match the shipped CSV exports; override for differently
/// labelled data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogColumns {
    /// Establishment identifier, present in the dish and restaurant tables
    pub establishment_id: String,
    /// Dish display name
    pub dish_name: String,
    /// Restaurant display name
    pub restaurant_name: String,
    /// Unique person identifier in the person table
    pub person_id: String,
}

impl Default for CatalogColumns {
    fn default() -> Self {
        Self {
            establishment_id: "EstablishmentId".to_string(),
            dish_name: "Name".to_string(),
            restaurant_name: "RestaurantName".to_string(),
            person_id: "NumeroSocioConsumidor".to_string(),
        }
    }
}

/// A catalog entry. A dish is identified by its catalog row index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dish {
    pub name: String,
    pub establishment_id: Option<String>,
}

/// Reference data joined to dishes by establishment id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub establishment_id: String,
    pub name: String,
}

/// A stored user profile over the canonical feature space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: String,
    pub features: Vector,
}

/// Errors raised while loading or querying catalog data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("Dish table has no category feature columns")]
    NoFeatureColumns,

    #[error("Dish catalog is empty")]
    EmptyCatalog,

    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("Non-numeric value in feature column '{column}' at row {row} of table '{table}'")]
    NonNumericFeature {
        table: String,
        column: String,
        row: usize,
    },

    #[error("Person '{person}' has no value for feature column '{column}'")]
    MissingFeature { person: String, column: String },

    #[error("Person row {0} has no id")]
    MissingPersonId(usize),

    #[error("Duplicate person id: {0}")]
    DuplicatePerson(String),

    #[error("Person not found: {0}")]
    PersonNotFound(String),
}

/// Validated, schema-aligned catalog.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    feature_columns: Vec<String>,
    dishes: Vec<Dish>,
    features: Matrix,
    restaurants: AHashMap<String, Restaurant>,
    people: AHashMap<String, Person>,
}

impl CatalogStore {
    /// Load and validate the three input tables.
    ///
    /// The canonical feature order is the dish table's column order; the
    /// person table must carry every dish feature column (under any name
    /// the schema resolves) with a numeric value per row. Restaurants are
    /// reference data: rows without an establishment id are skipped and
    /// duplicate ids keep the last row.
    ///
    /// # Errors
    ///
    /// `DataError` on an empty catalog, missing required columns, or
    /// malformed feature cells.
    pub fn load(
        schema: &FeatureSchema,
        columns: &CatalogColumns,
        dish_table: &Table,
        restaurant_table: &Table,
        person_table: &Table,
    ) -> Result<Self> {
        // Canonical feature order comes from the dish table. A column and
        // its display label resolving to the same category keep the first
        // occurrence.
        let mut feature_columns: Vec<String> = Vec::new();
        let mut dish_sources: Vec<String> = Vec::new();
        for column in dish_table.columns() {
            if let Some(canonical) = schema.canonical_feature(column) {
                if !feature_columns.iter().any(|c| c == canonical) {
                    feature_columns.push(canonical.to_string());
                    dish_sources.push(column.clone());
                }
            }
        }
        if feature_columns.is_empty() {
            return Err(DataError::NoFeatureColumns.into());
        }

        require_column(dish_table, "dishes", &columns.dish_name)?;
        require_column(dish_table, "dishes", &columns.establishment_id)?;
        require_column(restaurant_table, "restaurants", &columns.establishment_id)?;
        require_column(restaurant_table, "restaurants", &columns.restaurant_name)?;
        require_column(person_table, "people", &columns.person_id)?;

        let mut person_sources: Vec<String> = Vec::with_capacity(feature_columns.len());
        for canonical in &feature_columns {
            let source = person_table
                .columns()
                .iter()
                .find(|c| schema.canonical_feature(c) == Some(canonical.as_str()))
                .ok_or_else(|| DataError::MissingColumn {
                    table: "people".to_string(),
                    column: canonical.clone(),
                })?;
            person_sources.push(source.clone());
        }

        if dish_table.is_empty() {
            return Err(DataError::EmptyCatalog.into());
        }

        let mut dishes = Vec::with_capacity(dish_table.len());
        let mut data = Vec::with_capacity(dish_table.len() * feature_columns.len());
        for row in 0..dish_table.len() {
            for (canonical, source) in feature_columns.iter().zip(&dish_sources) {
                let value = dish_table.number(row, source).ok_or_else(|| {
                    DataError::NonNumericFeature {
                        table: "dishes".to_string(),
                        column: canonical.clone(),
                        row,
                    }
                })?;
                data.push(value as f32);
            }
            dishes.push(Dish {
                name: dish_table
                    .value(row, &columns.dish_name)
                    .and_then(cell_key)
                    .unwrap_or_default(),
                establishment_id: dish_table
                    .value(row, &columns.establishment_id)
                    .and_then(cell_key),
            });
        }
        let features = Matrix::from_vec(dish_table.len(), feature_columns.len(), data)?;

        let mut restaurants = AHashMap::with_capacity(restaurant_table.len());
        for row in 0..restaurant_table.len() {
            let id = match restaurant_table
                .value(row, &columns.establishment_id)
                .and_then(cell_key)
            {
                Some(id) => id,
                None => continue,
            };
            let name = restaurant_table
                .value(row, &columns.restaurant_name)
                .and_then(cell_key)
                .unwrap_or_default();
            restaurants.insert(
                id.clone(),
                Restaurant {
                    establishment_id: id,
                    name,
                },
            );
        }

        let mut people = AHashMap::with_capacity(person_table.len());
        for row in 0..person_table.len() {
            let id = person_table
                .value(row, &columns.person_id)
                .and_then(cell_key)
                .ok_or(DataError::MissingPersonId(row))?;
            let mut profile = Vec::with_capacity(feature_columns.len());
            for (canonical, source) in feature_columns.iter().zip(&person_sources) {
                let value = match person_table.value(row, source) {
                    None | Some(Value::Null) => {
                        return Err(DataError::MissingFeature {
                            person: id,
                            column: canonical.clone(),
                        }
                        .into())
                    }
                    Some(cell) => cell.as_f64().ok_or_else(|| DataError::NonNumericFeature {
                        table: "people".to_string(),
                        column: canonical.clone(),
                        row,
                    })?,
                };
                profile.push(value as f32);
            }
            let person = Person {
                id: id.clone(),
                features: Vector::new(profile),
            };
            if people.insert(id.clone(), person).is_some() {
                return Err(DataError::DuplicatePerson(id).into());
            }
        }

        info!(
            dishes = dishes.len(),
            features = feature_columns.len(),
            restaurants = restaurants.len(),
            people = people.len(),
            "catalog loaded"
        );

        Ok(Self {
            feature_columns,
            dishes,
            features,
            restaurants,
            people,
        })
    }

    /// Canonical feature column names, in dish-table order.
    #[inline]
    #[must_use]
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// Dish feature matrix, one row per dish in catalog order.
    #[inline]
    #[must_use]
    pub fn feature_matrix(&self) -> &Matrix {
        &self.features
    }

    #[inline]
    #[must_use]
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    #[must_use]
    pub fn dish(&self, index: usize) -> Option<&Dish> {
        self.dishes.get(index)
    }

    /// Number of dishes in the catalog.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Left-join lookup: a missing restaurant is `None`, never an error.
    #[must_use]
    pub fn restaurant_for(&self, establishment_id: &str) -> Option<&Restaurant> {
        self.restaurants.get(establishment_id)
    }

    /// Stored profile lookup by person id.
    #[must_use]
    pub fn person(&self, person_id: &str) -> Option<&Person> {
        self.people.get(person_id)
    }
}

fn require_column(
    table: &Table,
    table_name: &str,
    column: &str,
) -> std::result::Result<(), DataError> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(DataError::MissingColumn {
            table: table_name.to_string(),
            column: column.to_string(),
        })
    }
}

/// Join keys and display names may arrive as text or numbers; numbers
/// normalize to their decimal form so ids match across tables.
fn cell_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i.to_string()),
            None => n.as_f64().map(|f| f.to_string()),
        },
        _ => None,
    }
}
