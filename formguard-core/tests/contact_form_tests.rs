// formguard-core/tests/contact_form_tests.rs
//! End-to-end checks of the built-in contact-form rules and sanitizers, as
//! the form components use them.

use serde_json::{json, Value};
use test_log::test;

use formguard_core::sanitizers;
use formguard_core::{validate_field, validate_form, Field, ValidationRules};

#[test]
fn test_email_field_agrees_with_email_pattern() {
    let candidates = [
        "test@example.com",
        "user.name@domain.co.uk",
        "user+tag@example.org",
        "first_last@sub.domain.io",
        "notanemail",
        "@example.com",
        "user@",
        "user@.com",
        "user@domain",
        "user@domain.c",
    ];
    for candidate in candidates {
        let expected = ValidationRules::email().matches(candidate);
        assert_eq!(
            validate_field("email", &json!(candidate)).valid,
            expected,
            "field and pattern disagree for {:?}",
            candidate
        );
    }
}

#[test]
fn test_email_without_at_or_dotted_domain_is_invalid() {
    for candidate in ["example.com", "user@localhost", "user at example.com"] {
        assert!(!validate_field("email", &json!(candidate)).valid, "{}", candidate);
    }
}

#[test]
fn test_required_fields_report_required_message() {
    for field in [Field::Email, Field::FirstName, Field::LastName] {
        let result = validate_field(field.name(), &json!(""));
        assert_eq!(result.error.as_deref(), Some("This field is required"), "{}", field);
    }
}

#[test]
fn test_optional_fields_accept_empty_values() {
    for field in [Field::Phone, Field::Website, Field::Company, Field::Title, Field::Notes] {
        assert!(validate_field(field.name(), &json!("")).valid, "{}", field);
        assert!(validate_field(field.name(), &Value::Null).valid, "{}", field);
    }
}

#[test]
fn test_website_field() {
    assert!(validate_field("website", &json!("www.acme-dental.com/about")).valid);
    assert_eq!(
        validate_field("website", &json!("acme dental")).error.as_deref(),
        Some("Please enter a valid URL")
    );
}

#[test]
fn test_company_and_title_limits() {
    assert!(validate_field("company", &json!("c".repeat(100))).valid);
    assert_eq!(
        validate_field("title", &json!("t".repeat(101))).error.as_deref(),
        Some("Must be no more than 100 characters")
    );
}

#[test]
fn test_max_length_predicate_boundaries() {
    let rule = ValidationRules::max_length(5);
    assert!(rule.check(&json!("12345")));
    assert!(!rule.check(&json!("123456")));
    assert!(rule.check(&Value::Null));
    assert!(rule.check(&json!("")));
}

#[test]
fn test_special_characters_in_names() {
    let result = validate_field("firstName", &json!("John123@"));
    assert!(!result.valid);
    assert_eq!(result.error.as_deref(), Some("Special characters are not allowed"));
    assert!(validate_field("lastName", &json!("Van Der Berg")).valid);
}

#[test]
fn test_form_with_mixed_errors() {
    let form = json!({
        "email": "bad",
        "firstName": "",
        "lastName": "Doe",
        "phone": "abc"
    });
    let result = validate_form(form.as_object().unwrap());
    assert!(!result.valid);
    let mut keys: Vec<&str> = result.errors.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["email", "firstName", "phone"]);
}

#[test]
fn test_form_with_every_field_failing() {
    let form = json!({
        "email": "invalid-email",
        "firstName": "",
        "lastName": "Doe@#$",
        "phone": "abc"
    });
    let result = validate_form(form.as_object().unwrap());
    assert!(!result.valid);
    for field in ["email", "firstName", "lastName", "phone"] {
        assert!(result.error_for(field).is_some(), "missing error for {}", field);
    }
}

#[test]
fn test_form_result_does_not_depend_on_entry_order() {
    let forward = json!({ "email": "", "phone": "abc", "notes": "ok" });
    let backward = json!({ "notes": "ok", "phone": "abc", "email": "" });
    assert_eq!(
        validate_form(forward.as_object().unwrap()),
        validate_form(backward.as_object().unwrap())
    );
}

#[test]
fn test_html_scenarios() {
    assert_eq!(sanitizers::html(r#"<script>alert("xss")</script>John"#), "John");
    let once = sanitizers::html("<div><script>x</script> <i>Dr.</i> Smith </div>");
    assert_eq!(once, "Dr. Smith");
    assert_eq!(sanitizers::html(&once), once);
}

#[test]
fn test_escape_is_applied_exactly_once() {
    let input = r#"<script>&"'/ "#;
    let escaped = sanitizers::escape(input);
    assert_eq!(escaped, "&lt;script&gt;&amp;&quot;&#x27;&#x2F; ");
    assert_ne!(sanitizers::escape(&escaped), escaped);
}

#[test]
fn test_filename_scenario() {
    assert_eq!(sanitizers::filename("my file@#$.txt"), "my_file___.txt");
}

#[test]
fn test_validation_is_thread_safe() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let email = format!("rep{}@example.com", i);
                validate_field("email", &json!(email)).valid
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
