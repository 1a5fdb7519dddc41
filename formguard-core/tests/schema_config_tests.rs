// formguard-core/tests/schema_config_tests.rs
use anyhow::Result;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

use formguard_core::config::{self, FieldConfig, RuleSpec, RuleType, SchemaConfig};
use formguard_core::{
    get_or_compile_schema, prepare_submission, validate_field_with, validate_form_with, RuleSource, Sanitizer,
};

const TERRITORY_SCHEMA: &str = r#"
fields:
  - name: territory
    sanitize: [whitespace]
    rules:
      - kind: required
        message: "Pick a territory"
      - kind: pattern
        pattern: "^[A-Z]{2}-[0-9]+$"
        message: "Territory codes look like CA-12"
  - name: phone
    rules:
      - kind: required
      - kind: phone
"#;

fn write_schema(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_from_file() -> Result<()> {
    let file = write_schema(TERRITORY_SCHEMA)?;
    let config = SchemaConfig::load_from_file(file.path())?;

    assert_eq!(config.fields.len(), 2);
    let territory = config.field("territory").unwrap();
    assert_eq!(territory.sanitize, vec![Sanitizer::Whitespace]);
    assert_eq!(territory.rules[0].kind, RuleType::Required);
    assert_eq!(territory.rules[0].message.as_deref(), Some("Pick a territory"));
    assert_eq!(territory.rules[1].pattern.as_deref(), Some("^[A-Z]{2}-[0-9]+$"));
    assert!(!territory.rules[1].case_insensitive);
    Ok(())
}

#[test]
fn test_load_schema_by_name_accepts_a_path() -> Result<()> {
    let file = write_schema(TERRITORY_SCHEMA)?;
    let path = file.path().to_str().unwrap().to_string();
    let config = config::load_schema_by_name(&path)?;
    assert!(config.field("phone").is_some());
    Ok(())
}

#[test]
fn test_load_schema_by_name_missing() {
    let err = config::load_schema_by_name("definitely-not-a-schema-name").unwrap_err();
    assert!(err.to_string().contains("not found"), "{}", err);
}

#[test]
fn test_load_from_file_rejects_invalid_schema() -> Result<()> {
    let yaml = r#"
fields:
  - name: notes
    rules:
      - kind: max_length
  - name: code
    rules:
      - kind: pattern
        pattern: "([0-9"
        message: "Bad code"
"#;
    let file = write_schema(yaml)?;
    let err = SchemaConfig::load_from_file(file.path()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("requires a `length`"), "{}", message);
    assert!(message.contains("invalid regex pattern"), "{}", message);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_unknown_rule_kind() -> Result<()> {
    let yaml = r#"
fields:
  - name: email
    rules:
      - kind: rfc5322
"#;
    let file = write_schema(yaml)?;
    let err = SchemaConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse schema file"));
    Ok(())
}

#[test]
fn test_load_from_file_missing_file() {
    let err = SchemaConfig::load_from_file("/nonexistent/formguard/schema.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read schema file"));
}

#[test]
fn test_builtin_schema_yaml_round_trip() -> Result<()> {
    let builtin = SchemaConfig::builtin();
    let yaml = builtin.to_yaml_string()?;
    let reparsed = SchemaConfig::from_yaml_str(&yaml)?;
    assert_eq!(reparsed, builtin);
    Ok(())
}

#[test]
fn test_merged_schema_validates_forms() -> Result<()> {
    let user = SchemaConfig::from_yaml_str(TERRITORY_SCHEMA)?;
    let merged = config::merge_schemas(SchemaConfig::builtin(), Some(user));
    let schema = get_or_compile_schema(&merged)?;

    // Phone is required in the merged schema, unlike the built-in binding.
    let phone = validate_field_with(schema.as_ref(), "phone", &json!(""));
    assert_eq!(phone.error.as_deref(), Some("This field is required"));

    let form = json!({
        "email": "rep@example.com",
        "firstName": "Ana",
        "territory": "california",
        "phone": "555-123-4567"
    });
    let result = validate_form_with(schema.as_ref(), form.as_object().unwrap());
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.error_for("territory"), Some("Territory codes look like CA-12"));
    Ok(())
}

#[test]
fn test_prepare_submission_with_schema_sanitizers() -> Result<()> {
    let config = SchemaConfig {
        fields: vec![FieldConfig {
            name: "attachment".to_string(),
            rules: vec![RuleSpec::new(RuleType::MaxLength).with_length(20)],
            sanitize: vec![Sanitizer::Whitespace, Sanitizer::Filename],
        }],
    };
    let schema = get_or_compile_schema(&config)?;
    assert_eq!(schema.field_names(), vec!["attachment"]);

    let form = json!({ "attachment": "  price list (final).pdf " });
    let submission = prepare_submission(schema.as_ref(), form.as_object().unwrap());
    assert_eq!(submission.cleaned["attachment"], json!("price_list__final_.pdf"));
    assert!(!submission.is_valid());
    assert_eq!(
        submission.result.error_for("attachment"),
        Some("Must be no more than 20 characters")
    );
    Ok(())
}
