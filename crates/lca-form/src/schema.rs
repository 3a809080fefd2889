//! Category definitions for the mine data input wizard.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const SCHEMA_VERSION: u32 = 1;

/// One wizard step and the fields that must be filled before leaving it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDef {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub required: Vec<String>,
}

/// Ordered category table. The order is the wizard step order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySchema {
    #[serde(default = "default_version")]
    pub version: u32,
    pub categories: Vec<CategoryDef>,
}

fn default_version() -> u32 {
    SCHEMA_VERSION
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Schema defines no categories")]
    Empty,

    #[error("Duplicate category: {id}")]
    DuplicateCategory { id: String },

    #[error("Duplicate field {field} in category {category}")]
    DuplicateField { category: String, field: String },

    #[error("Invalid identifier '{id}' in {context}: expected lowercase-first camelCase")]
    InvalidIdentifier { id: String, context: String },

    #[error("Unsupported schema version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn category(id: &str, title: &str, required: &[&str]) -> CategoryDef {
    CategoryDef {
        id: id.to_string(),
        title: title.to_string(),
        required: required.iter().map(|f| f.to_string()).collect(),
    }
}

impl CategorySchema {
    /// Built-in table for India-specific mine data.
    pub fn india() -> Self {
        Self {
            version: SCHEMA_VERSION,
            categories: vec![
                category(
                    "general",
                    "Mine Information",
                    &["mineName", "state", "district", "mineralType", "leaseArea"],
                ),
                category(
                    "production",
                    "Production",
                    &["productionVolume", "oreGrade", "operatingDays"],
                ),
                category("mining", "Mining Operations", &["strippingRatio", "mineDepth"]),
                category(
                    "processing",
                    "Mineral Processing",
                    &["beneficiationMethod", "recoveryRate"],
                ),
                category("energy", "Energy", &["gridElectricity", "fuelOilConsumption"]),
                category("water", "Water", &["waterConsumption", "waterSource"]),
                category(
                    "emissions",
                    "Air Emissions",
                    &["particulateMatter", "sulfurDioxide"],
                ),
                category("waste", "Waste", &["overburdenGenerated", "tailingsGenerated"]),
                category("land", "Land Use", &["landDisturbed", "reclaimedArea"]),
                category(
                    "transport",
                    "Transport",
                    &["transportMode", "transportDistance"],
                ),
                category("additional", "Additional Information", &[]),
            ],
        }
    }

    pub fn category(&self, id: &str) -> Option<&CategoryDef> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    /// Required fields for `id`; unknown categories require nothing.
    pub fn required_fields(&self, id: &str) -> &[String] {
        self.category(id).map(|c| c.required.as_slice()).unwrap_or(&[])
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.id.as_str())
    }

    /// Every required field across the table, first appearance wins.
    pub fn all_fields(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.categories
            .iter()
            .flat_map(|c| c.required.iter())
            .filter(|f| seen.insert(f.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategorySchema {
    fn default() -> Self {
        Self::india()
    }
}

fn is_identifier(id: &str) -> bool {
    let mut chars = id.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Structural checks applied to schemas loaded from a document.
pub fn validate_schema(schema: &CategorySchema) -> Result<(), SchemaError> {
    if schema.version > SCHEMA_VERSION {
        return Err(SchemaError::UnsupportedVersion {
            version: schema.version,
        });
    }

    if schema.categories.is_empty() {
        return Err(SchemaError::Empty);
    }

    let mut category_ids = HashSet::new();
    for category in &schema.categories {
        if !is_identifier(&category.id) {
            return Err(SchemaError::InvalidIdentifier {
                id: category.id.clone(),
                context: "category id".to_string(),
            });
        }
        if !category_ids.insert(&category.id) {
            return Err(SchemaError::DuplicateCategory {
                id: category.id.clone(),
            });
        }

        let mut fields = HashSet::new();
        for field in &category.required {
            if !is_identifier(field) {
                return Err(SchemaError::InvalidIdentifier {
                    id: field.clone(),
                    context: format!("category '{}' fields", category.id),
                });
            }
            if !fields.insert(field) {
                return Err(SchemaError::DuplicateField {
                    category: category.id.clone(),
                    field: field.clone(),
                });
            }
        }
    }

    Ok(())
}
