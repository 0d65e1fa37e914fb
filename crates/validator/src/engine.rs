//! Rule evaluation.
//!
//! [`Validator::validate`] walks the rules in order. For each rule it reads
//! the named field through the record's [`Schema`](crate::record::Schema),
//! resolves every predicate of the rule's expression against one registry
//! snapshot, evaluates them, and appends a [`FieldError`] when the expression
//! fails. A failing rule is data; only a misconfigured rule set makes the call
//! itself fail, and then no partial report is returned.

use std::any::type_name;

use tracing::{debug, trace};

use crate::config::{UnknownFieldPolicy, ValidatorConfig};
use crate::error::{Error, RegistrationError, ValidatorError};
use crate::predicates;
use crate::record::Record;
use crate::registry::{Predicate, PredicateRegistry, RegistrySnapshot};
use crate::report::{ErrorReport, FieldError};
use crate::rule::Rule;

/// Predicates of one rule: all terms must pass, any alternative in a term may.
type ResolvedTerms<'a> = Vec<Vec<&'a dyn Predicate>>;

/// Validates records against rule lists.
///
/// A validator owns its predicate registry. It is `Send + Sync`: validation
/// calls may run concurrently with each other and with registration.
///
/// # Examples
///
/// ```rust
/// use fieldrules::{Record, Rule, Validator};
/// use serde::Serialize;
/// use serde_json::Value;
///
/// #[derive(Serialize, Record)]
/// struct User {
///     #[serde(rename = "name")]
///     user_name: String,
///     #[serde(rename = "age")]
///     age: String,
/// }
///
/// let validator = Validator::new();
/// validator
///     .register("is-even", |v: &Value| {
///         v.as_str().and_then(|s| s.parse::<i64>().ok()).is_some_and(|n| n % 2 == 0)
///     })
///     .unwrap();
///
/// let rules = [
///     Rule::new("user_name", "required,alpha", "Name must contain only letters"),
///     Rule::new("age", "required,numeric,is-even", "Age must be an even integer"),
/// ];
///
/// let user = User { user_name: "John123".into(), age: "30".into() };
/// let report = validator.validate(&user, &rules).unwrap();
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.errors()[0].field(), "name");
/// ```
#[derive(Debug)]
pub struct Validator {
    registry: PredicateRegistry,
    config: ValidatorConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Creates a validator with the default configuration and the built-in
    /// predicates.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Creates a validator from `config`.
    #[must_use]
    pub fn with_config(config: ValidatorConfig) -> Self {
        let registry = PredicateRegistry::new();
        if config.register_builtins {
            predicates::register_builtins(&registry);
        }
        debug!(
            predicates = registry.len(),
            unknown_fields = ?config.unknown_fields,
            "created validator"
        );
        Self { registry, config }
    }

    /// Creates a validator around an existing registry.
    ///
    /// Built-ins are added on top when `config.register_builtins` is set,
    /// replacing same-named entries.
    #[must_use]
    pub fn with_registry(registry: PredicateRegistry, config: ValidatorConfig) -> Self {
        if config.register_builtins {
            predicates::register_builtins(&registry);
        }
        Self { registry, config }
    }

    /// Registers or replaces a named predicate.
    pub fn register<P>(&self, name: impl Into<String>, predicate: P) -> Result<(), RegistrationError>
    where
        P: Predicate + 'static,
    {
        self.registry.register(name, predicate)
    }

    /// The predicate registry.
    pub fn registry(&self) -> &PredicateRegistry {
        &self.registry
    }

    /// The configuration this validator was built with.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Checks that every predicate named by `rules` is registered.
    ///
    /// Unlike [`validate`](Self::validate) this looks at every rule, whether or
    /// not its field exists on some record type.
    pub fn check(&self, rules: &[Rule]) -> Result<(), ValidatorError> {
        let predicates = self.registry.snapshot();
        for rule in rules {
            resolve_terms(&predicates, rule)?;
        }
        Ok(())
    }

    /// Validates `record` against `rules`.
    ///
    /// Returns the errors of every failing rule, in rule order; an empty
    /// report means the record is valid. Rules naming a field the record does
    /// not have are skipped unless the configuration says otherwise.
    ///
    /// `record` is borrowed as the record type itself. Pass a boxed or shared
    /// record as `&*boxed`; a `&Box<R>` or `&&R` does not implement [`Record`].
    pub fn validate<R: Record>(&self, record: &R, rules: &[Rule]) -> Result<ErrorReport, ValidatorError> {
        let schema = R::schema();
        let predicates = self.registry.snapshot();
        let mut report = ErrorReport::new();

        for rule in rules {
            let Some(value) = schema.resolve_value(record, rule.field()) else {
                match self.config.unknown_fields {
                    UnknownFieldPolicy::Skip => {
                        trace!(field = rule.field(), "field not on record, rule skipped");
                        continue;
                    }
                    UnknownFieldPolicy::Reject => {
                        return Err(ValidatorError::UnknownField {
                            field: rule.field().to_owned(),
                            record: type_name::<R>(),
                        });
                    }
                }
            };

            let terms = resolve_terms(&predicates, rule)?;
            let passed = terms
                .iter()
                .all(|alternatives| alternatives.iter().any(|predicate| predicate.test(&value)));

            if passed {
                trace!(field = rule.field(), expression = %rule.expression(), "rule passed");
            } else {
                let field = schema.error_name(rule.field());
                trace!(field, expression = %rule.expression(), "rule failed");
                report.push(FieldError::new(field, rule.message()));
            }
        }

        debug!(
            record = type_name::<R>(),
            rules = rules.len(),
            errors = report.len(),
            "validated record"
        );
        Ok(report)
    }

    /// Validates and turns a non-empty report into an error.
    pub fn validate_result<R: Record>(&self, record: &R, rules: &[Rule]) -> Result<(), Error> {
        self.validate(record, rules)?.into_result()?;
        Ok(())
    }
}

/// Resolves every predicate of `rule` before any of them runs, so an unknown
/// name fails the call even when an earlier predicate would short-circuit.
fn resolve_terms<'a>(
    predicates: &'a RegistrySnapshot,
    rule: &Rule,
) -> Result<ResolvedTerms<'a>, ValidatorError> {
    rule.expression()
        .terms()
        .iter()
        .map(|term| {
            term.alternatives()
                .iter()
                .map(|name| {
                    predicates
                        .get(name)
                        .ok_or_else(|| ValidatorError::UnknownPredicate {
                            predicate: name.clone(),
                            field: rule.field().to_owned(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
