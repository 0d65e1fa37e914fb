//! # fieldrules
//!
//! Validates the fields of a record against an ordered list of rules and
//! reports failures under the fields' serialization names.
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldrules::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Serialize, Record)]
//! struct User {
//!     #[serde(rename = "name")]
//!     full_name: String,
//!     #[serde(rename = "email")]
//!     email: String,
//! }
//!
//! let validator = Validator::new();
//! let rules = rules! {
//!     full_name: "required,alpha" => "Name must contain only letters",
//!     email: "required,email" => "Email must be a valid email address",
//! };
//!
//! let user = User { full_name: "John123".into(), email: "john@example.com".into() };
//! let report = validator.validate(&user, &rules)?;
//! assert_eq!(report.describe(), "validation errors: [name: Name must contain only letters]");
//! # Ok::<(), fieldrules::ValidatorError>(())
//! ```
//!
//! ## Pieces
//!
//! - [`PredicateRegistry`](registry::PredicateRegistry): named predicates, extended at runtime
//! - [`Record`](record::Record) / [`Schema`](record::Schema): per-type field table
//! - [`Validator`]: the rule engine
//! - [`ErrorReport`]: ordered `(field, message)` failures
//! - [`predicates`]: the built-in predicate set

// Lets `#[derive(Record)]` output (which names `::fieldrules`) compile inside this crate.
extern crate self as fieldrules;

pub mod config;
pub mod engine;
pub mod error;
pub mod expression;
mod macros;
pub mod predicates;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod report;
pub mod rule;

pub use config::{UnknownFieldPolicy, ValidatorConfig};
pub use engine::Validator;
pub use error::{ConfigError, Error, RegistrationError, ValidationFailed, ValidatorError};
pub use expression::Expression;
pub use record::{Record, Schema, SchemaBuilder};
pub use registry::{Predicate, PredicateRegistry, SharedPredicate};
pub use report::{ErrorReport, FieldError};
pub use rule::Rule;

#[cfg(feature = "derive")]
pub use fieldrules_macros::Record;
