//! Step-by-step session over the category table.
//!
//! The session owns the entered values and the last error map. All checks go
//! through [`validate_category`]; the session only decides where to go next and
//! what a form would focus and announce when a step is refused.

use crate::schema::CategorySchema;
use crate::validate::{FieldErrors, validate_category};
use crate::values::FieldValues;
use serde::Serialize;

pub const NOTIFICATION_TITLE: &str = "Validation Error";
pub const NOTIFICATION_BODY: &str = "Please fill in all required fields before proceeding.";

/// Single toast raised when a step is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    fn missing_fields() -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            description: NOTIFICATION_BODY.to_string(),
        }
    }
}

/// Why the session stayed where it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub category: String,
    pub focus: String,
    pub errors: FieldErrors,
    pub notification: Notification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Advanced { from: String, to: String },
    Returned { to: String },
    Stayed { at: String },
    Finished { at: String },
    Blocked(Rejection),
    Submitted { values: FieldValues },
    UnknownCategory { id: String },
}

/// The table is taken as given; [`crate::load_schema`] is where structure is
/// checked. With an empty table the session has no current category:
/// `progress()` is `(0, 0)`, `advance()` stays put and `submit()` succeeds.
#[derive(Debug, Clone)]
pub struct WizardSession {
    schema: CategorySchema,
    values: FieldValues,
    errors: FieldErrors,
    position: usize,
}

impl WizardSession {
    pub fn new(schema: CategorySchema) -> Self {
        Self::with_values(schema, FieldValues::new())
    }

    pub fn with_values(schema: CategorySchema, values: FieldValues) -> Self {
        Self {
            schema,
            values,
            errors: FieldErrors::new(),
            position: 0,
        }
    }

    pub fn schema(&self) -> &CategorySchema {
        &self.schema
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Errors from the last refused step.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Current category id. An empty schema reports `""`.
    pub fn current(&self) -> &str {
        self.schema
            .categories
            .get(self.position)
            .map(|c| c.id.as_str())
            .unwrap_or("")
    }

    /// (1-based step, total steps). `(0, 0)` for an empty table.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.schema.len();
        ((self.position + 1).min(total), total)
    }

    fn is_last(&self) -> bool {
        self.position + 1 >= self.schema.len()
    }

    pub fn set_value(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        self.errors.clear_field(&field);
        self.values.set(field, value);
    }

    /// Validate `category`; on failure store the errors and build the rejection.
    fn check(&mut self, category: &str) -> Result<(), Rejection> {
        let validation = validate_category(&self.schema, category, &self.values);
        if validation.is_valid() {
            self.errors = FieldErrors::new();
            return Ok(());
        }

        let errors = validation.errors;
        let focus = errors.first_field().unwrap_or_default().to_string();
        tracing::debug!(
            category,
            missing = errors.len(),
            focus = %focus,
            "step refused"
        );
        self.errors = errors.clone();
        Err(Rejection {
            category: category.to_string(),
            focus,
            errors,
            notification: Notification::missing_fields(),
        })
    }

    /// Validate the current category and move to the next one.
    pub fn advance(&mut self) -> StepOutcome {
        if self.schema.is_empty() {
            return StepOutcome::Stayed { at: String::new() };
        }
        let from = self.current().to_string();
        if let Err(rejection) = self.check(&from) {
            return StepOutcome::Blocked(rejection);
        }
        if self.is_last() {
            return StepOutcome::Finished { at: from };
        }
        self.position += 1;
        let to = self.current().to_string();
        tracing::debug!(from = %from, to = %to, "advanced");
        StepOutcome::Advanced { from, to }
    }

    /// Move back one category without validating.
    pub fn back(&mut self) -> StepOutcome {
        if self.position == 0 {
            return StepOutcome::Stayed {
                at: self.current().to_string(),
            };
        }
        self.position -= 1;
        StepOutcome::Returned {
            to: self.current().to_string(),
        }
    }

    /// Jump to `category`. Moving forward requires the current category to pass.
    pub fn go_to(&mut self, category: &str) -> StepOutcome {
        let Some(target) = self.schema.position(category) else {
            return StepOutcome::UnknownCategory {
                id: category.to_string(),
            };
        };

        if target == self.position {
            return StepOutcome::Stayed {
                at: category.to_string(),
            };
        }

        if target < self.position {
            self.position = target;
            return StepOutcome::Returned {
                to: category.to_string(),
            };
        }

        let from = self.current().to_string();
        if let Err(rejection) = self.check(&from) {
            return StepOutcome::Blocked(rejection);
        }
        self.position = target;
        tracing::debug!(from = %from, to = category, "jumped");
        StepOutcome::Advanced {
            from,
            to: category.to_string(),
        }
    }

    /// Validate every category in order. The first failing one becomes current.
    pub fn submit(&mut self) -> StepOutcome {
        let ids: Vec<String> = self.schema.ids().map(str::to_string).collect();
        for (idx, id) in ids.iter().enumerate() {
            if let Err(rejection) = self.check(id) {
                self.position = idx;
                return StepOutcome::Blocked(rejection);
            }
        }
        tracing::debug!(fields = self.values.len(), "submitted");
        StepOutcome::Submitted {
            values: self.values.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CategoryDef;

    fn def(id: &str, required: &[&str]) -> CategoryDef {
        CategoryDef {
            id: id.to_string(),
            title: id.to_string(),
            required: required.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn small_schema() -> CategorySchema {
        CategorySchema {
            version: 1,
            categories: vec![
                def("mining", &["strippingRatio", "mineDepth"]),
                def("energy", &["gridElectricity", "fuelOilConsumption"]),
                def("additional", &[]),
            ],
        }
    }

    #[test]
    fn blocked_step_reports_focus_and_notification() {
        let mut wizard = WizardSession::new(small_schema());
        wizard.set_value("strippingRatio", "2.5");

        let StepOutcome::Blocked(rejection) = wizard.advance() else {
            panic!("expected block");
        };
        assert_eq!(rejection.category, "mining");
        assert_eq!(rejection.focus, "mineDepth");
        assert_eq!(rejection.notification.title, NOTIFICATION_TITLE);
        assert_eq!(wizard.current(), "mining");
        assert_eq!(wizard.errors().get("mineDepth"), Some("Mine Depth is required"));
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut wizard = WizardSession::new(small_schema());
        wizard.advance();
        assert_eq!(wizard.errors().len(), 2);
        wizard.set_value("mineDepth", "300");
        assert_eq!(wizard.errors().len(), 1);
        assert!(!wizard.errors().contains("mineDepth"));
    }

    #[test]
    fn advances_through_to_finish() {
        let mut wizard = WizardSession::new(small_schema());
        wizard.set_value("strippingRatio", "2.5");
        wizard.set_value("mineDepth", "300");
        assert_eq!(
            wizard.advance(),
            StepOutcome::Advanced {
                from: "mining".to_string(),
                to: "energy".to_string()
            }
        );
        assert!(wizard.errors().is_empty());

        wizard.set_value("gridElectricity", "120");
        wizard.set_value("fuelOilConsumption", "14");
        wizard.advance();
        assert_eq!(wizard.current(), "additional");
        assert_eq!(wizard.progress(), (3, 3));
        assert_eq!(
            wizard.advance(),
            StepOutcome::Finished {
                at: "additional".to_string()
            }
        );
    }

    #[test]
    fn back_never_validates() {
        let mut wizard = WizardSession::new(small_schema());
        assert!(matches!(wizard.back(), StepOutcome::Stayed { .. }));
        wizard.set_value("strippingRatio", "1");
        wizard.set_value("mineDepth", "1");
        wizard.advance();
        wizard.set_value("strippingRatio", "");
        assert_eq!(
            wizard.back(),
            StepOutcome::Returned {
                to: "mining".to_string()
            }
        );
    }

    #[test]
    fn go_to_forward_requires_current_category() {
        let mut wizard = WizardSession::new(small_schema());
        assert!(matches!(wizard.go_to("additional"), StepOutcome::Blocked(_)));
        assert_eq!(wizard.current(), "mining");

        wizard.set_value("strippingRatio", "1");
        wizard.set_value("mineDepth", "1");
        assert!(matches!(
            wizard.go_to("additional"),
            StepOutcome::Advanced { .. }
        ));
        assert_eq!(wizard.current(), "additional");
        assert!(matches!(wizard.go_to("mining"), StepOutcome::Returned { .. }));
        assert!(matches!(
            wizard.go_to("smelting"),
            StepOutcome::UnknownCategory { .. }
        ));
    }

    #[test]
    fn submit_stops_at_first_failing_category() {
        let mut wizard = WizardSession::new(small_schema());
        wizard.set_value("strippingRatio", "1");
        wizard.set_value("mineDepth", "1");
        wizard.set_value("gridElectricity", "120");

        let StepOutcome::Blocked(rejection) = wizard.submit() else {
            panic!("expected block");
        };
        assert_eq!(rejection.category, "energy");
        assert_eq!(rejection.focus, "fuelOilConsumption");
        assert_eq!(wizard.current(), "energy");

        wizard.set_value("fuelOilConsumption", "14");
        let StepOutcome::Submitted { values } = wizard.submit() else {
            panic!("expected submission");
        };
        assert_eq!(values.get("fuelOilConsumption"), Some("14"));
    }

    #[test]
    fn empty_table_has_no_steps() {
        let schema = CategorySchema {
            version: 1,
            categories: vec![],
        };
        let mut wizard = WizardSession::new(schema);
        assert_eq!(wizard.current(), "");
        assert_eq!(wizard.progress(), (0, 0));
        assert_eq!(wizard.advance(), StepOutcome::Stayed { at: String::new() });
        assert_eq!(wizard.progress(), (0, 0));
        assert!(matches!(wizard.back(), StepOutcome::Stayed { .. }));
        assert!(matches!(wizard.submit(), StepOutcome::Submitted { .. }));
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = StepOutcome::Returned {
            to: "mining".to_string(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"outcome":"returned","to":"mining"}"#);
    }
}
