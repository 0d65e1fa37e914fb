//! Prelude module for convenient imports.
//!
//! ```rust
//! use fieldrules::prelude::*;
//!
//! let validator = Validator::new();
//! let rules = rules! { email: "required,email" => "Email must be valid" };
//! assert!(validator.check(&rules).is_ok());
//! ```

pub use crate::config::{UnknownFieldPolicy, ValidatorConfig};
pub use crate::engine::Validator;
pub use crate::error::{Error, RegistrationError, ValidationFailed, ValidatorError};
pub use crate::record::{Record, Schema};
pub use crate::registry::Predicate;
pub use crate::report::{ErrorReport, FieldError};
pub use crate::rule::Rule;
pub use crate::rules;

#[cfg(feature = "derive")]
pub use fieldrules_macros::Record;
