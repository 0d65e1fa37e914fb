//! Validation rules.

use crate::expression::Expression;

/// One validation directive: which field, which predicates, which message.
///
/// Rules are immutable once built and can be shared across calls and threads.
///
/// # Examples
///
/// ```rust
/// use fieldrules::Rule;
///
/// let rule = Rule::new("age", "required,numeric", "Age must be a number");
/// assert_eq!(rule.field(), "age");
/// assert_eq!(rule.expression().to_string(), "required,numeric");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    field: String,
    expression: Expression,
    message: String,
}

impl Rule {
    /// Creates a rule for the field with internal identifier `field`.
    pub fn new(
        field: impl Into<String>,
        expression: impl Into<Expression>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Internal identifier of the validated field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The parsed expression.
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Message reported when the rule fails.
    pub fn message(&self) -> &str {
        &self.message
    }
}
