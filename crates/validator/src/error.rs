//! Fatal error types.
//!
//! A failing rule is never an error: it becomes a
//! [`FieldError`](crate::report::FieldError) inside the returned
//! [`ErrorReport`]. The types here cover configuration problems only, so a
//! caller always gets either a complete report or one of these.

use thiserror::Error;

use crate::report::ErrorReport;

/// A validation call could not run to completion.
///
/// No partial report accompanies this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    /// A rule expression names a predicate that was never registered.
    #[error("unknown predicate `{predicate}` in rule for field `{field}`")]
    UnknownPredicate {
        /// The unresolved predicate name.
        predicate: String,
        /// Internal identifier of the rule's field.
        field: String,
    },

    /// A rule names a field the record type does not have.
    ///
    /// Only raised under [`UnknownFieldPolicy::Reject`](crate::config::UnknownFieldPolicy::Reject).
    #[error("field `{field}` does not exist on `{record}`")]
    UnknownField {
        /// Internal identifier named by the rule.
        field: String,
        /// Type name of the record being validated.
        record: &'static str,
    },
}

/// A predicate could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The predicate name was empty or whitespace.
    #[error("predicate name must not be empty")]
    EmptyName,

    /// The name contains an expression separator or padding whitespace and
    /// could never be referenced from a rule.
    #[error("predicate name `{name}` contains a separator or surrounding whitespace")]
    ReservedCharacter {
        /// The rejected name.
        name: String,
    },

    /// No predicate was supplied.
    #[error("no predicate supplied for `{name}`")]
    MissingPredicate {
        /// The name the caller tried to register.
        name: String,
    },
}

/// A validator configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source was not valid JSON or did not match the configuration shape.
    #[error("invalid validator configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A record was validated successfully but broke at least one rule.
///
/// Produced by [`ErrorReport::into_result`] and
/// [`Validator::validate_result`](crate::Validator::validate_result) for callers
/// that prefer `?` over inspecting the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{report}")]
pub struct ValidationFailed {
    report: ErrorReport,
}

impl ValidationFailed {
    pub(crate) fn new(report: ErrorReport) -> Self {
        Self { report }
    }

    /// The failed rules, in rule order.
    pub fn report(&self) -> &ErrorReport {
        &self.report
    }

    /// Consumes the error and returns the report.
    pub fn into_report(self) -> ErrorReport {
        self.report
    }
}

/// Umbrella error for callers that want a single error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Misconfigured rule set.
    #[error(transparent)]
    Validator(#[from] ValidatorError),

    /// Invalid predicate registration.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Invalid configuration source.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The record broke one or more rules.
    #[error(transparent)]
    Invalid(#[from] ValidationFailed),
}
