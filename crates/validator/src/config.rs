//! Validator configuration.
//!
//! Every field has a default, so a partial document is enough:
//!
//! ```rust
//! use fieldrules::config::{UnknownFieldPolicy, ValidatorConfig};
//!
//! let config = ValidatorConfig::from_json_str(r#"{ "unknown_fields": "reject" }"#).unwrap();
//! assert!(config.register_builtins);
//! assert_eq!(config.unknown_fields, UnknownFieldPolicy::Reject);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to do with a rule naming a field the record type lacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Ignore the rule. Lets one rule set serve several record shapes.
    #[default]
    Skip,
    /// Fail the call with [`ValidatorError::UnknownField`](crate::ValidatorError::UnknownField).
    Reject,
}

/// Settings fixed when a [`Validator`](crate::Validator) is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Pre-register the [built-in predicates](crate::predicates).
    pub register_builtins: bool,
    /// Handling of rules whose field does not exist.
    pub unknown_fields: UnknownFieldPolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            register_builtins: true,
            unknown_fields: UnknownFieldPolicy::Skip,
        }
    }
}

impl ValidatorConfig {
    /// Sets whether built-in predicates are registered.
    pub fn with_builtins(mut self, enabled: bool) -> Self {
        self.register_builtins = enabled;
        self
    }

    /// Sets the unknown-field policy.
    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Reads a configuration from JSON.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }
}
