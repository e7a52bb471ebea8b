//! Second-pass conditional visibility resolution.
//!
//! A field's visibility may depend on another field's generated value, so
//! this pass runs only after every value in a set exists. It consumes the
//! batch and returns a new one; callers never observe partial mutation.

use std::collections::HashMap;

use serde_json::Value;

use crate::domain::form::{InputField, TestSet};

struct Rule {
    short_key: String,
    show: Option<bool>,
    when: String,
    eq: Value,
}

/// Apply every conditional spec in `fields` across the whole batch.
///
/// Only fields carrying both a controlling key (`when`) and an expected
/// value (`eq`) participate. Removing an already-absent field is a no-op,
/// which makes the pass idempotent.
pub fn resolve(mut sets: Vec<TestSet>, fields: &[InputField]) -> Vec<TestSet> {
    let rules: Vec<Rule> = fields
        .iter()
        .filter_map(|field| {
            let cond = field.conditional.as_ref()?;
            Some(Rule {
                short_key: field.short_key().to_string(),
                show: cond.show,
                when: cond.when.clone()?,
                eq: cond.eq.clone()?,
            })
        })
        .collect();

    if rules.is_empty() {
        return sets;
    }

    for set in &mut sets {
        // Snapshot of every field value across panels, by short key. Taken
        // once per set; rule applications within the set do not see each
        // other's deletions.
        let lookup: HashMap<String, Value> = set
            .panels
            .iter()
            .flat_map(|panel| panel.fields.iter())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        for rule in &rules {
            let met = condition_met(&rule.eq, lookup.get(&rule.when));
            let remove = match rule.show {
                Some(false) => met,
                Some(true) => !met,
                None => false,
            };
            if remove {
                remove_field(set, &rule.short_key);
            }
        }
    }

    sets
}

/// A boolean `eq` matches only the identical boolean; a string `eq`
/// matches the string form of the controlling value. Any other `eq` type
/// (numbers included) never matches, and neither does a missing
/// controlling value.
fn condition_met(eq: &Value, control: Option<&Value>) -> bool {
    match (eq, control) {
        (Value::Bool(expected), Some(Value::Bool(actual))) => expected == actual,
        (Value::String(expected), Some(actual)) => value_to_string(actual) == *expected,
        _ => false,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Delete the field from the first panel that carries it; silently skip
/// when no panel does.
fn remove_field(set: &mut TestSet, short_key: &str) {
    for panel in &mut set.panels {
        if panel.fields.contains_key(short_key) {
            panel.fields.remove(short_key);
            return;
        }
    }
}
