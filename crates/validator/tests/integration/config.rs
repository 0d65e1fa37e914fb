use fieldrules::prelude::*;
use fieldrules::{ConfigError, PredicateRegistry};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize, Record)]
struct Contact {
    #[serde(rename = "email")]
    address: String,
}

fn contact(address: &str) -> Contact {
    Contact {
        address: address.into(),
    }
}

#[test]
fn config_from_json_drives_validator() {
    let config = ValidatorConfig::from_json_str(
        r#"{ "register_builtins": true, "unknown_fields": "reject" }"#,
    )
    .unwrap();
    let validator = Validator::with_config(config);

    let rules = rules! { phone: "required" => "Phone is required" };
    let err = validator.validate(&contact("a@b.co"), &rules).unwrap_err();
    assert!(matches!(err, ValidatorError::UnknownField { ref field, .. } if field == "phone"));
    assert!(err.to_string().contains("Contact"));
}

#[test]
fn without_builtins_only_custom_predicates_exist() {
    let validator = Validator::with_config(ValidatorConfig::default().with_builtins(false));
    assert!(validator.registry().is_empty());

    let rules = rules! { address: "email" => "Email must be valid" };
    assert!(validator.validate(&contact("a@b.co"), &rules).is_err());

    validator
        .register("email", |value: &Value| value.as_str().is_some_and(|s| s.contains('@')))
        .unwrap();
    assert!(validator.validate(&contact("a@b"), &rules).unwrap().is_empty());
}

#[test]
fn existing_registry_keeps_custom_entries() {
    let registry = PredicateRegistry::new();
    registry
        .register("corporate", |value: &Value| {
            value.as_str().is_some_and(|s| s.ends_with("@example.com"))
        })
        .unwrap();

    let validator = Validator::with_registry(registry, ValidatorConfig::default());
    let rules = rules! { address: "required,email,corporate" => "Use your work address" };

    assert!(validator.validate(&contact("ann@example.com"), &rules).unwrap().is_empty());
    let report = validator.validate(&contact("ann@gmail.com"), &rules).unwrap();
    assert_eq!(report.fields().collect::<Vec<_>>(), ["email"]);
}

#[test]
fn malformed_config_is_an_error() {
    let err = ValidatorConfig::from_json_str(r#"{ "unknown_fields": "explode" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let umbrella: Error = err.into();
    assert!(umbrella.to_string().starts_with("invalid validator configuration"));
}
