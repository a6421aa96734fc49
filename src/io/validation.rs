//! Record field validation.
//!
//! [`validate`] guards create/update and trims before checking.
//! [`has_required_values`] is the plain emptiness check used for parsed CSV
//! rows and for loaded collections.

use crate::models::RecordFields;
use crate::{Error, Result};

/// A required field that is missing or blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The field that has an issue.
    pub field: &'static str,
    /// Description of the issue.
    pub message: &'static str,
}

/// Returns every issue found in `fields`.
///
/// `name` and `location` must be non-empty after trimming. Optional fields
/// are not checked.
#[must_use]
pub fn check(fields: &RecordFields) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if fields.name.trim().is_empty() {
        issues.push(ValidationIssue {
            field: "name",
            message: "name is required",
        });
    }
    if fields.location.trim().is_empty() {
        issues.push(ValidationIssue {
            field: "location",
            message: "location is required",
        });
    }

    issues
}

/// Returns whether `name` and `location` hold any value at all.
///
/// Parsed CSV rows and loaded collections use this rule: a value made only
/// of whitespace still counts.
#[must_use]
pub fn has_required_values(fields: &RecordFields) -> bool {
    !fields.name.is_empty() && !fields.location.is_empty()
}

/// Validates `fields` for saving.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming every missing field.
pub fn validate(fields: &RecordFields) -> Result<()> {
    let issues = check(fields);
    if issues.is_empty() {
        return Ok(());
    }

    let message = issues
        .iter()
        .map(|issue| issue.message)
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::Validation(message))
}
