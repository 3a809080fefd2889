//! Required-field validation for a single wizard category.

use crate::label::required_message;
use crate::schema::CategorySchema;
use crate::values::FieldValues;
use serde::{Serialize, Serializer};

/// Field identifier -> error message, kept in requirement-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, message: String) {
        self.0.push((field.to_string(), message));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Drop the entry for `field`, if any.
    pub fn clear_field(&mut self, field: &str) {
        self.0.retain(|(f, _)| f != field);
    }

    /// The field a caller should focus.
    pub fn first_field(&self) -> Option<&str> {
        self.0.first().map(|(f, _)| f.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(f, _)| f.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Outcome of validating one category. Recomputed per call, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub errors: FieldErrors,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Tuple form: `(is_valid, errors)`.
    pub fn into_parts(self) -> (bool, FieldErrors) {
        (self.is_valid(), self.errors)
    }
}

/// Check that every required field of `category` holds non-blank text.
///
/// Unknown categories require nothing and always pass. Missing keys count as
/// blank. `values` is only read.
pub fn validate_category(
    schema: &CategorySchema,
    category: &str,
    values: &FieldValues,
) -> Validation {
    let mut errors = FieldErrors::new();
    for field in schema.required_fields(category) {
        if values.is_blank(field) {
            errors.push(field, required_message(field));
        }
    }
    Validation { errors }
}

/// [`validate_category`] against the built-in India table.
pub fn validate(category: &str, values: &FieldValues) -> Validation {
    validate_category(&CategorySchema::india(), category, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_missing_fuel_oil() {
        let values: FieldValues = [("gridElectricity", "120"), ("fuelOilConsumption", "")]
            .into_iter()
            .collect();
        let (ok, errors) = validate("energy", &values).into_parts();
        assert!(!ok);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("fuelOilConsumption"),
            Some("Fuel Oil Consumption is required")
        );
        assert_eq!(errors.first_field(), Some("fuelOilConsumption"));
    }

    #[test]
    fn mining_complete() {
        let values: FieldValues = [("strippingRatio", "2.5"), ("mineDepth", "300")]
            .into_iter()
            .collect();
        let result = validate("mining", &values);
        assert!(result.is_valid());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn errors_follow_requirement_order() {
        let result = validate("general", &FieldValues::new());
        let fields: Vec<&str> = result.errors.fields().collect();
        assert_eq!(
            fields,
            vec!["mineName", "state", "district", "mineralType", "leaseArea"]
        );
    }

    #[test]
    fn clear_field_removes_entry() {
        let mut errors = validate("mining", &FieldValues::new()).errors;
        errors.clear_field("strippingRatio");
        assert_eq!(errors.first_field(), Some("mineDepth"));
        assert!(!errors.contains("strippingRatio"));
    }

    #[test]
    fn serializes_as_ordered_map() {
        let result = validate("mining", &FieldValues::new());
        let json = serde_json::to_string(&result.errors).unwrap();
        let expected = concat!(
            r#"{"strippingRatio":"Stripping Ratio is required","#,
            r#""mineDepth":"Mine Depth is required"}"#,
        );
        assert_eq!(json, expected);
    }
}
