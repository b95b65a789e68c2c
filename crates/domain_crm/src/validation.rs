//! Record validation rules
//!
//! Validation mirrors the constraints Capsule enforces server side, so an
//! invalid record is rejected before any request is sent.
//!
//! # Validation Rules
//!
//! ## Person
//! - First name is required when there is no last name
//! - Last name is required when there is no first name
//!
//! ## Organisation
//! - Name is required
//!
//! ## Opportunity
//! - Name, party and milestone are required
//!
//! ## Case
//! - Name and party are required
//!
//! ## Task
//! - Description is required
//! - Due date is required unless a due date time is given, and vice versa
//!
//! ## History item
//! - Note is required
//! - Must belong to a party, case or opportunity
//!
//! Contact emails and participant emails are checked with `validator`.

use core_kernel::PortError;

/// Result of record validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether the record is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Creates a failed validation result with errors
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds "`label` can't be blank" when `value` is missing or whitespace
    pub fn require(&mut self, label: &str, value: Option<&str>) {
        if is_blank(value) {
            self.add_error(format!("{label} can't be blank"));
        }
    }

    /// Adds "`label` can't be blank" when `present` is false
    pub fn require_present(&mut self, label: &str, present: bool) {
        if !present {
            self.add_error(format!("{label} can't be blank"));
        }
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
    }

    /// Folds field errors reported by the `validator` crate into this result
    pub fn absorb(&mut self, outcome: Result<(), validator::ValidationErrors>) {
        let Err(errors) = outcome else {
            return;
        };

        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, _)| format!("{} is invalid", humanize(&field.to_string())))
            .collect();
        messages.sort();
        for message in messages {
            self.add_error(message);
        }
    }

    /// Converts the result into a `RecordInvalid` error when it has errors
    pub fn into_result(self, entity_type: &str) -> Result<(), PortError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(PortError::record_invalid(entity_type, self.errors))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Records that can check themselves before being sent to Capsule
pub trait Validatable {
    /// Runs every validation rule for the record
    fn validation(&self) -> ValidationResult;

    /// Returns true when no rule fails
    fn is_valid(&self) -> bool {
        self.validation().is_valid
    }
}

/// Returns true for `None`, `""` and whitespace-only strings
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Turns `email_address` into `Email address`
fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_blank_values() {
        let mut result = ValidationResult::ok();
        result.require("Name", None);
        result.require("Description", Some("   "));
        result.require("Note", Some("Called"));

        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Name can't be blank", "Description can't be blank"]
        );
    }

    #[test]
    fn test_merge_propagates_failure() {
        let mut result = ValidationResult::ok();
        result.merge(ValidationResult::fail(vec!["Note can't be blank".into()]));

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_fail_with_no_errors_is_valid() {
        assert!(ValidationResult::fail(Vec::new()).is_valid);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationResult::ok().into_result("Task").is_ok());

        let err = ValidationResult::fail(vec!["Description can't be blank".into()])
            .into_result("Task")
            .unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(err.validation_errors(), ["Description can't be blank"]);
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("email_address"), "Email address");
        assert_eq!(humanize(""), "");
    }
}
