//! Integration tests for fieldrules.

mod concurrency;
mod config;
mod derive;
mod scenario;

use fieldrules::Validator;
use serde_json::Value;

/// The string parses as an even integer.
pub fn is_even(value: &Value) -> bool {
    value
        .as_str()
        .and_then(|s| s.parse::<i64>().ok())
        .is_some_and(|n| n % 2 == 0)
}

/// A validator with the built-ins plus `is-even`.
pub fn validator() -> Validator {
    let validator = Validator::new();
    validator
        .register("is-even", is_even)
        .expect("is-even is a valid name");
    validator
}
