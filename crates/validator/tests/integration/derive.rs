use fieldrules::prelude::*;
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize, Record)]
#[serde(rename_all = "camelCase")]
struct Signup {
    first_name: String,
    #[serde(rename = "mail")]
    email_address: String,
    #[serde(rename(serialize = "zip", deserialize = "postcode"))]
    postal_code: String,
    #[serde(skip)]
    draft: bool,
    #[record(rename = "handle")]
    r#type: String,
    #[serde(skip)]
    #[record(skip)]
    #[allow(dead_code)]
    session: Session,
}

struct Session;

fn signup() -> Signup {
    Signup {
        first_name: "Ann".into(),
        email_address: "ann@example.com".into(),
        postal_code: "10115".into(),
        draft: false,
        r#type: "admin".into(),
        session: Session,
    }
}

#[test]
fn schema_lists_fields_in_declaration_order() {
    let schema = Signup::schema();
    assert_eq!(
        schema.identifiers().collect::<Vec<_>>(),
        ["first_name", "email_address", "postal_code", "draft", "type"]
    );
    assert!(!schema.contains("session"));
}

#[test]
fn external_names_follow_serde_and_record_attributes() {
    let schema = Signup::schema();
    assert_eq!(schema.external_name("first_name"), Some("firstName"));
    assert_eq!(schema.external_name("email_address"), Some("mail"));
    assert_eq!(schema.external_name("postal_code"), Some("zip"));
    assert_eq!(schema.external_name("draft"), None);
    assert_eq!(schema.external_name("type"), Some("handle"));
}

#[test]
fn values_are_read_through_serde() {
    let record = signup();
    let schema = Signup::schema();
    assert_eq!(schema.resolve_value(&record, "first_name"), Some(json!("Ann")));
    assert_eq!(schema.resolve_value(&record, "draft"), Some(json!(false)));
    assert_eq!(schema.resolve_value(&record, "session"), None);
}

#[test]
fn errors_use_derived_names() {
    let record = Signup {
        first_name: String::new(),
        draft: false,
        ..signup()
    };
    let rules = rules! {
        first_name: "required" => "First name is required",
        draft: "required" => "Must be a draft",
        r#type: "uppercase" => "Handle must be uppercase",
    };

    let report = Validator::new().validate(&record, &rules).unwrap();
    assert_eq!(
        report.fields().collect::<Vec<_>>(),
        ["firstName", "draft", "handle"]
    );
}

#[test]
fn skipped_field_is_an_unknown_field() {
    let rules = rules! { session: "required" => "Session required" };

    let lenient = Validator::new();
    assert!(lenient.validate(&signup(), &rules).unwrap().is_empty());

    let strict = Validator::with_config(
        ValidatorConfig::default().with_unknown_fields(UnknownFieldPolicy::Reject),
    );
    assert!(matches!(
        strict.validate(&signup(), &rules),
        Err(ValidatorError::UnknownField { ref field, .. }) if field == "session"
    ));
}

#[derive(Serialize, Record)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[record(rename_all = "kebab-case")]
struct Settings {
    max_retries: u32,
    #[serde(rename = "TIMEOUT")]
    timeout_secs: u64,
}

#[test]
fn record_rename_all_wins_over_serde() {
    let schema = Settings::schema();
    assert_eq!(schema.external_name("max_retries"), Some("max-retries"));
    assert_eq!(schema.external_name("timeout_secs"), Some("TIMEOUT"));

    let record = Settings {
        max_retries: 0,
        timeout_secs: 30,
    };
    let rules = rules! { max_retries: "required" => "Retries must be set" };
    let report = Validator::new().validate(&record, &rules).unwrap();
    assert_eq!(report.fields().collect::<Vec<_>>(), ["max-retries"]);
}

#[derive(Serialize, Record)]
struct Plain {
    count: u32,
    tags: Vec<String>,
}

#[test]
fn fields_without_names_report_identifiers() {
    let record = Plain {
        count: 0,
        tags: vec![],
    };
    let rules = rules! {
        count: "required" => "count",
        tags: "required" => "tags",
    };
    let report = Validator::new().validate(&record, &rules).unwrap();
    assert_eq!(report.fields().collect::<Vec<_>>(), ["count", "tags"]);
}
