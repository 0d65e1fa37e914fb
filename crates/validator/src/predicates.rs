//! Built-in predicates.
//!
//! Registered on every [`Validator`](crate::Validator) unless
//! [`ValidatorConfig::register_builtins`](crate::config::ValidatorConfig) is off.
//! All of them are total: a value of the wrong shape fails instead of
//! panicking.
//!
//! | Name | Passes when |
//! |------|-------------|
//! | `required` | the value is not its zero value (null, `""`, `0`, `false`, `[]`, `{}`) |
//! | `alpha` | non-empty string of ASCII letters |
//! | `alphanum` | non-empty string of ASCII letters and digits |
//! | `numeric` | a number, or a string like `-12` or `3.14` |
//! | `number` | a non-negative integer, or a non-empty string of ASCII digits |
//! | `email` | an email-shaped string |
//! | `url` | an `http`/`https` URL string |
//! | `lowercase` | non-empty string with no uppercase letters |
//! | `uppercase` | non-empty string with no lowercase letters |
//! | `ascii` | string of ASCII characters |

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::registry::PredicateRegistry;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("email pattern is valid")
});

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("url pattern is valid")
});

static NUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?[0-9]+(?:\.[0-9]+)?$").expect("numeric pattern is valid")
});

/// Name and implementation of every built-in.
pub const BUILTINS: &[(&str, fn(&Value) -> bool)] = &[
    ("required", required),
    ("alpha", alpha),
    ("alphanum", alphanum),
    ("numeric", numeric),
    ("number", number),
    ("email", email),
    ("url", url),
    ("lowercase", lowercase),
    ("uppercase", uppercase),
    ("ascii", ascii),
];

pub(crate) fn register_builtins(registry: &PredicateRegistry) {
    for &(name, predicate) in BUILTINS {
        registry.insert_builtin(name, Arc::new(predicate));
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// The value differs from its type's zero value.
pub fn required(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// ASCII letters only.
pub fn alpha(value: &Value) -> bool {
    non_empty_str(value).is_some_and(|s| s.bytes().all(|b| b.is_ascii_alphabetic()))
}

/// ASCII letters and digits only.
pub fn alphanum(value: &Value) -> bool {
    non_empty_str(value).is_some_and(|s| s.bytes().all(|b| b.is_ascii_alphanumeric()))
}

/// A number, or a string holding a signed integer or decimal.
pub fn numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => NUMERIC_REGEX.is_match(s),
        _ => false,
    }
}

/// A non-negative integer, or a string of digits.
pub fn number(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_u64(),
        Value::String(s) => !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

pub fn email(value: &Value) -> bool {
    value.as_str().is_some_and(|s| EMAIL_REGEX.is_match(s))
}

pub fn url(value: &Value) -> bool {
    value.as_str().is_some_and(|s| URL_REGEX.is_match(s))
}

pub fn lowercase(value: &Value) -> bool {
    non_empty_str(value).is_some_and(|s| s.to_lowercase() == s)
}

pub fn uppercase(value: &Value) -> bool {
    non_empty_str(value).is_some_and(|s| s.to_uppercase() == s)
}

pub fn ascii(value: &Value) -> bool {
    value.as_str().is_some_and(str::is_ascii)
}
