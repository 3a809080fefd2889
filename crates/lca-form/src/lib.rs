//! lca-form: category schema and required-field validation for the mine data
//! input wizard.

pub mod label;
pub mod schema;
pub mod validate;
pub mod values;
pub mod wizard;

pub use label::humanize_field_id;
pub use schema::{CategoryDef, CategorySchema, SchemaError, validate_schema};
pub use validate::{FieldErrors, Validation, validate, validate_category};
pub use values::FieldValues;
pub use wizard::{Notification, Rejection, StepOutcome, WizardSession};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

pub type FormResult<T> = Result<T, FormError>;

#[derive(thiserror::Error, Debug)]
pub enum FormError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Unsupported document format: {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Yaml,
    Json,
}

impl DocFormat {
    pub fn from_path(path: &Path) -> FormResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(FormError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

fn read_doc<T: DeserializeOwned>(path: &Path) -> FormResult<T> {
    let format = DocFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let doc = match format {
        DocFormat::Yaml => serde_yaml::from_str(&content)?,
        DocFormat::Json => serde_json::from_str(&content)?,
    };
    Ok(doc)
}

pub fn to_string<T: Serialize>(doc: &T, format: DocFormat) -> FormResult<String> {
    let content = match format {
        DocFormat::Yaml => serde_yaml::to_string(doc)?,
        DocFormat::Json => serde_json::to_string_pretty(doc)?,
    };
    Ok(content)
}

fn write_doc<T: Serialize>(path: &Path, doc: &T) -> FormResult<()> {
    let content = to_string(doc, DocFormat::from_path(path)?)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a category table and check its structure.
pub fn load_schema(path: &Path) -> FormResult<CategorySchema> {
    let schema: CategorySchema = read_doc(path)?;
    validate_schema(&schema)?;
    tracing::info!(
        path = %path.display(),
        categories = schema.len(),
        "loaded category schema"
    );
    Ok(schema)
}

/// Load a custom table from `path`, or fall back to the built-in India table.
pub fn load_schema_or_default(path: Option<&Path>) -> FormResult<CategorySchema> {
    match path {
        Some(path) => load_schema(path),
        None => Ok(CategorySchema::india()),
    }
}

pub fn save_schema(path: &Path, schema: &CategorySchema) -> FormResult<()> {
    validate_schema(schema)?;
    write_doc(path, schema)
}

/// Load entered values. Keys the schema expects but the document lacks are
/// logged, not rejected: validation treats them as blank.
pub fn load_values(path: &Path, schema: &CategorySchema) -> FormResult<FieldValues> {
    let values: FieldValues = read_doc(path)?;
    let missing = values.missing_keys(schema);
    if !missing.is_empty() {
        tracing::warn!(
            path = %path.display(),
            missing = ?missing,
            "values document omits schema fields"
        );
    }
    Ok(values)
}

pub fn save_values(path: &Path, values: &FieldValues) -> FormResult<()> {
    write_doc(path, values)
}
