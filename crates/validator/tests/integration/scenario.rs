use fieldrules::prelude::*;
use pretty_assertions::assert_eq;
use serde::Serialize;

use crate::validator;

#[derive(Serialize, Record)]
struct User {
    #[serde(rename = "name")]
    user_name: String,
    #[serde(rename = "email")]
    email: String,
    #[serde(rename = "age")]
    age: String,
}

fn user(name: &str, email: &str, age: &str) -> User {
    User {
        user_name: name.into(),
        email: email.into(),
        age: age.into(),
    }
}

fn user_rules() -> Vec<Rule> {
    rules! {
        user_name: "required,alpha" => "Name must contain only letters",
        email: "required,email" => "Email must be a valid email address",
        age: "required,numeric,is-even" => "Age must be an even integer",
    }
}

#[test]
fn valid_user_passes() {
    let report = validator()
        .validate(&user("JohnDoe", "john.doe@example.com", "30"), &user_rules())
        .unwrap();
    assert!(report.is_empty());
}

#[test]
fn invalid_user_reports_every_rule_in_order() {
    let report = validator()
        .validate(&user("John123", "invalid-email", "31"), &user_rules())
        .unwrap();

    let expected: ErrorReport = vec![
        FieldError::new("name", "Name must contain only letters"),
        FieldError::new("email", "Email must be a valid email address"),
        FieldError::new("age", "Age must be an even integer"),
    ]
    .into();
    assert_eq!(report, expected);
}

#[test]
fn rule_list_is_reusable() {
    let validator = validator();
    let rules = user_rules();

    let bad = user("John123", "john.doe@example.com", "30");
    let first = validator.validate(&bad, &rules).unwrap();
    let second = validator.validate(&bad, &rules).unwrap();
    assert_eq!(first, second);

    let good = user("JohnDoe", "john.doe@example.com", "30");
    assert!(validator.validate(&good, &rules).unwrap().is_empty());
}

#[test]
fn validate_result_wraps_report() {
    let err = validator()
        .validate_result(&user("", "john.doe@example.com", "30"), &user_rules())
        .unwrap_err();

    let failed = match err {
        Error::Invalid(failed) => failed,
        other => panic!("expected a failed validation, got {other:?}"),
    };
    assert_eq!(failed.report().fields().collect::<Vec<_>>(), ["name"]);
    assert_eq!(
        failed.to_string(),
        "validation errors: [name: Name must contain only letters]"
    );
}

#[test]
fn unregistered_custom_predicate_is_fatal() {
    let err = Validator::new()
        .validate(&user("JohnDoe", "john.doe@example.com", "30"), &user_rules())
        .unwrap_err();
    assert_eq!(
        err,
        ValidatorError::UnknownPredicate {
            predicate: "is-even".into(),
            field: "age".into(),
        }
    );
}

#[test]
fn check_catches_typos_before_validation() {
    let validator = validator();
    assert!(validator.check(&user_rules()).is_ok());

    let typo = rules! { email: "required,emial" => "Email must be valid" };
    assert!(matches!(
        validator.check(&typo),
        Err(ValidatorError::UnknownPredicate { ref predicate, .. }) if predicate == "emial"
    ));
}

#[test]
fn override_then_render() {
    let mut report = validator()
        .validate(&user("John123", "invalid-email", "31"), &user_rules())
        .unwrap();

    assert_eq!(report.override_message("email", "Please check your email"), 1);
    insta::assert_snapshot!(
        report.describe(),
        @"validation errors: [name: Name must contain only letters; email: Please check your email; age: Age must be an even integer]"
    );
}

#[test]
fn report_serializes_as_list() {
    let report = validator()
        .validate(&user("JohnDoe", "invalid-email", "30"), &user_rules())
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "field": "email", "message": "Email must be a valid email address" }
        ])
    );
}
