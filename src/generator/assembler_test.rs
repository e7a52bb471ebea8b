use super::assembler::TestSetAssembler;
use super::synthesizer::{SynthesisOptions, ValueSynthesizer};
use super::walker::walk;
use chrono::{TimeZone, Utc};
use serde_json::json;

fn assembler() -> TestSetAssembler {
    TestSetAssembler::with_synthesizer(
        ValueSynthesizer::with_clock(
            SynthesisOptions::default(),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ),
        5,
    )
}

#[test]
fn test_assemble_groups_by_panel_with_short_keys() {
    let schema = json!({
        "components": [
            {
                "type": "panel",
                "key": "personal",
                "title": "Personal",
                "components": [{ "type": "email", "key": "email" }]
            }
        ]
    });
    let parsed = walk(&schema);

    let sets = assembler().assemble(&parsed, 2);

    assert_eq!(sets.len(), 2);
    for set in &sets {
        assert_eq!(set.panels.len(), 1);
        assert_eq!(set.panels[0].title, "Personal");
        // Qualified key "personal.email" lands under its short key.
        assert!(set.panels[0].fields.contains_key("email"));
        assert!(!set.panels[0].fields.contains_key("personal.email"));
    }
}

#[test]
fn test_assemble_three_sets_of_emails() {
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
    let parsed = walk(&schema);

    let sets = assembler().assemble(&parsed, 3);

    assert_eq!(sets.len(), 3);
    let emails: Vec<&str> = sets
        .iter()
        .map(|s| s.panels[0].fields["email"].as_str().unwrap())
        .collect();
    assert_eq!(
        emails,
        vec!["user1@yahoo.com", "user2@outlook.com", "user3@example.com"]
    );
}

#[test]
fn test_assemble_zero_request_uses_default_count() {
    let schema = json!({
        "components": [
            {
                "type": "panel",
                "key": "p",
                "title": "P",
                "components": [{ "type": "number", "key": "n" }]
            }
        ]
    });
    let parsed = walk(&schema);

    let sets = assembler().assemble(&parsed, 0);

    assert_eq!(sets.len(), 5);
}

#[test]
fn test_assemble_applies_conditional_resolution() {
    let schema = json!({
        "components": [
            {
                "type": "panel",
                "key": "p",
                "title": "P",
                "components": [
                    { "type": "checkbox", "key": "optIn" },
                    {
                        "type": "textfield",
                        "key": "reason",
                        "conditional": { "show": false, "when": "optIn", "eq": true }
                    }
                ]
            }
        ]
    });
    let parsed = walk(&schema);

    // Checkbox alternates false/true across seed indices, so the hidden
    // field must be removed exactly in the sets where optIn is true.
    let sets = assembler().assemble(&parsed, 4);

    for set in &sets {
        let fields = &set.panels[0].fields;
        let opted_in = fields["optIn"].as_bool().unwrap();
        assert_eq!(fields.contains_key("reason"), !opted_in);
    }
}

#[test]
fn test_assemble_every_field_present_before_resolution() {
    let schema = json!({
        "components": [
            { "type": "textfield", "key": "a" },
            { "type": "number", "key": "b" },
            { "type": "datetime", "key": "c" }
        ]
    });
    let parsed = walk(&schema);

    let sets = assembler().assemble(&parsed, 1);

    // Default-panel fallback: one synthetic panel carrying all fields.
    assert_eq!(sets[0].panels.len(), 1);
    let fields = &sets[0].panels[0].fields;
    assert_eq!(fields.len(), 3);
    assert!(fields.contains_key("a"));
    assert!(fields.contains_key("b"));
    assert!(fields.contains_key("c"));
}
