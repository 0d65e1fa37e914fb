//! Error reports.
//!
//! A report is the ordered list of rules a record broke, each entry naming
//! the field by its external name. It serializes as a JSON array of
//! `{"field": ..., "message": ...}` objects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationFailed;

// ============================================================================
// FIELD ERROR
// ============================================================================

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldError {
    field: String,
    message: String,
}

impl FieldError {
    /// Creates an error for the field with external name `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// External name of the field, or its identifier when it has none.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The failed rule's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FieldError {}

// ============================================================================
// ERROR REPORT
// ============================================================================

/// Ordered field errors from one validation call.
///
/// Empty means the record satisfied every rule. Two reports are equal when
/// they hold the same errors in the same order.
///
/// # Examples
///
/// ```rust
/// use fieldrules::{ErrorReport, FieldError};
///
/// let mut report: ErrorReport = vec![
///     FieldError::new("name", "Name must contain only letters"),
///     FieldError::new("age", "Age must be an even integer"),
/// ]
/// .into();
///
/// assert_eq!(report.override_message("age", "Age is invalid"), 1);
/// assert_eq!(report.errors()[1].message(), "Age is invalid");
/// assert_eq!(report.override_message("email", "unused"), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorReport {
    errors: Vec<FieldError>,
}

impl ErrorReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Appends an error.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Returns `true` if no rule failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failed rules.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// All errors, in rule order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Iterates the errors in rule order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Errors reported for the field with external name `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |error| error.field == field)
    }

    /// Names of the failed fields in rule order; repeated when a field failed
    /// several rules.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(FieldError::field)
    }

    /// Replaces the message of every error for `field`.
    ///
    /// Returns the number of errors changed; zero leaves the report untouched.
    pub fn override_message(&mut self, field: &str, message: impl Into<String>) -> usize {
        let message = message.into();
        let mut changed = 0;
        for error in self.errors.iter_mut().filter(|error| error.field == field) {
            error.message.clone_from(&message);
            changed += 1;
        }
        changed
    }

    /// Human-readable rendering for logs. The format is not stable.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// `Ok(())` when empty, otherwise the report as an error.
    pub fn into_result(self) -> Result<(), ValidationFailed> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailed::new(self))
        }
    }

    /// Consumes the report and returns its errors.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl From<Vec<FieldError>> for ErrorReport {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

impl FromIterator<FieldError> for ErrorReport {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorReport {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorReport {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation errors: [")?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        write!(f, "]")
    }
}

impl std::error::Error for ErrorReport {}

// ============================================================================
// TESTS
// ============================================================================
