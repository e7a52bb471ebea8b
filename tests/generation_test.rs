//! End-to-end tests of the local generation pipeline.

use formgen::config::GenerationSettings;
use formgen::domain::error::GenerationError;
use formgen::generator::generate_local;
use serde_json::json;

fn settings() -> GenerationSettings {
    GenerationSettings::default()
}

#[test]
fn test_contact_panel_three_sets() {
    let schema = json!({
        "components": [
            {
                "type": "panel",
                "key": "contact",
                "title": "Contact",
                "components": [{ "type": "textfield", "key": "email" }]
            }
        ]
    });

    let sets = generate_local(&schema, 3, &settings()).unwrap();

    assert_eq!(sets.len(), 3);
    let mut seen = Vec::new();
    for set in &sets {
        let email = set.panels[0].fields["email"].as_str().unwrap();
        // userN@domain.tld
        let (user, domain) = email.split_once('@').expect("an email address");
        assert!(user.starts_with("user"));
        assert!(user["user".len()..].chars().all(|c| c.is_ascii_digit()));
        assert!(domain.contains('.'));
        seen.push(email.to_string());
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 3, "three distinct records expected");
}

#[test]
fn test_generation_is_deterministic() {
    let schema = json!({
        "components": [
            {
                "type": "panel",
                "key": "p",
                "title": "P",
                "components": [
                    { "type": "textfield", "key": "name" },
                    { "type": "number", "key": "qty", "validate": { "min": 1, "max": 9 } },
                    { "type": "checkbox", "key": "flag" }
                ]
            }
        ]
    });

    let first = generate_local(&schema, 4, &settings()).unwrap();
    let second = generate_local(&schema, 4, &settings()).unwrap();

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn test_conditional_field_removed_when_hidden() {
    let schema = json!({
        "components": [
            {
                "type": "panel",
                "key": "p",
                "title": "P",
                "components": [
                    { "type": "checkbox", "key": "A" },
                    {
                        "type": "textfield",
                        "key": "B",
                        "conditional": { "show": false, "when": "A", "eq": true }
                    }
                ]
            }
        ]
    });

    let sets = generate_local(&schema, 4, &settings()).unwrap();

    for set in &sets {
        let fields = &set.panels[0].fields;
        match fields["A"].as_bool().unwrap() {
            true => assert!(!fields.contains_key("B"), "B must be hidden when A is true"),
            false => assert!(fields.contains_key("B"), "B must remain when A is false"),
        }
    }
}

#[test]
fn test_root_fields_get_default_panel() {
    let schema = json!({
        "components": [
            { "type": "textfield", "key": "one" },
            { "type": "email", "key": "two" }
        ]
    });

    let sets = generate_local(&schema, 1, &settings()).unwrap();

    assert_eq!(sets[0].panels.len(), 1);
    assert_eq!(sets[0].panels[0].title, "Form Data");
    assert_eq!(sets[0].panels[0].fields.len(), 2);
}

#[test]
fn test_invalid_schema_and_no_fields_are_distinct_errors() {
    let not_a_schema = json!({ "title": "just some JSON" });
    let err = generate_local(&not_a_schema, 1, &settings()).unwrap_err();
    assert!(matches!(err, GenerationError::InvalidSchema));

    let empty_form = json!({ "components": [{ "type": "button", "key": "submit" }] });
    let err = generate_local(&empty_form, 1, &settings()).unwrap_err();
    assert!(matches!(err, GenerationError::NoFieldsFound));
}

#[test]
fn test_zero_sets_falls_back_to_configured_default() {
    let schema = json!({
        "components": [{ "type": "textfield", "key": "x" }]
    });
    let custom = GenerationSettings {
        default_sets: 2,
        ..Default::default()
    };

    let sets = generate_local(&schema, 0, &custom).unwrap();

    assert_eq!(sets.len(), 2);
}

#[test]
fn test_multi_panel_document_order_is_stable() {
    let schema = json!({
        "components": [
            {
                "type": "panel",
                "key": "first",
                "title": "First",
                "components": [{ "type": "textfield", "key": "a" }]
            },
            {
                "type": "panel",
                "key": "second",
                "title": "Second",
                "components": [{ "type": "textfield", "key": "b" }]
            }
        ]
    });

    let sets = generate_local(&schema, 1, &settings()).unwrap();

    let titles: Vec<&str> = sets[0].panels.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}
