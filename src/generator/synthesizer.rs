//! Deterministic per-field value synthesis.
//!
//! Every value is a pure function of the field descriptor and the seed
//! index, so identical inputs always produce identical test sets. The
//! clock used for datetime fields is injected at construction time, which
//! keeps the calendar offset reproducible in tests.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use crate::domain::form::{FieldKind, InputField};

const FIRST_NAMES: [&str; 8] = [
    "John", "Maria", "Alex", "Sarah", "Michael", "Emma", "David", "Sofia",
];
const LAST_NAMES: [&str; 8] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
];
// Two email domain lists exist on purpose: the key-heuristic branch for
// text fields and the dedicated email type each carry their own ordering.
const TEXT_EMAIL_DOMAINS: [&str; 5] = [
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "example.com",
    "sfgov.org",
];
const EMAIL_DOMAINS: [&str; 5] = [
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "sfgov.org",
    "example.com",
];
const STREETS: [&str; 5] = [
    "Market St",
    "Mission St",
    "Van Ness Ave",
    "Geary Blvd",
    "California St",
];
const CITIES: [&str; 5] = [
    "San Francisco",
    "Oakland",
    "Berkeley",
    "San Jose",
    "Palo Alto",
];

/// Default numeric bounds applied when a number field carries no min/max
/// constraint. Passed in from configuration rather than hardcoded.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisOptions {
    pub number_min: i64,
    pub number_max: i64,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            number_min: 0,
            number_max: 100,
        }
    }
}

/// Rule-based value generator for one field at a time.
pub struct ValueSynthesizer {
    options: SynthesisOptions,
    now: DateTime<Utc>,
}

impl ValueSynthesizer {
    pub fn new(options: SynthesisOptions) -> Self {
        Self::with_clock(options, Utc::now())
    }

    /// Construct with a fixed clock. Tests use this to pin datetime output.
    pub fn with_clock(options: SynthesisOptions, now: DateTime<Utc>) -> Self {
        Self { options, now }
    }

    /// Produce one plausible value for `field` at the given set index.
    ///
    /// The seed is `seed_index + 1` so index 0 does not collapse every
    /// modular product to zero. Never fails for a well-formed descriptor;
    /// missing optional sub-fields fall back to documented defaults.
    pub fn synthesize(&self, field: &InputField, seed_index: usize) -> Value {
        let seed = seed_index as i64 + 1;

        match field.kind() {
            Some(FieldKind::TextField) | Some(FieldKind::TextArea) => self.text_value(field, seed),
            Some(FieldKind::Number) => self.number_value(field, seed),
            Some(FieldKind::Email) => json!(format!(
                "tester{}@{}",
                seed,
                EMAIL_DOMAINS[(seed % EMAIL_DOMAINS.len() as i64) as usize]
            )),
            Some(FieldKind::Checkbox) => json!(seed % 2 == 0),
            Some(FieldKind::Select) | Some(FieldKind::Radio) => choice_value(field, seed),
            Some(FieldKind::DateTime) => {
                json!((self.now + Duration::days(seed % 30)).to_rfc3339())
            }
            Some(FieldKind::PhoneNumber) => json!(phone_number(seed)),
            // password, selectboxes, day, time, address, signature and any
            // unknown tag all share the generic fallback.
            _ => json!(format!("Value {}", seed)),
        }
    }

    /// Free-text synthesis with name heuristics on the field key.
    fn text_value(&self, field: &InputField, seed: i64) -> Value {
        let key = field.key.to_lowercase();

        if key.contains("name") {
            let first = FIRST_NAMES[((seed * 3) % FIRST_NAMES.len() as i64) as usize];
            let last = LAST_NAMES[((seed * 7) % LAST_NAMES.len() as i64) as usize];
            return json!(format!("{} {}", first, last));
        }
        if key.contains("email") {
            let domain = TEXT_EMAIL_DOMAINS[(seed % TEXT_EMAIL_DOMAINS.len() as i64) as usize];
            return json!(format!("user{}@{}", seed, domain));
        }
        if key.contains("phone") {
            return json!(phone_number(seed));
        }
        if key.contains("address") {
            let street = STREETS[(seed % STREETS.len() as i64) as usize];
            return json!(format!("{} {}", 100 + (seed * 53) % 900, street));
        }
        if key.contains("city") {
            return json!(CITIES[(seed % CITIES.len() as i64) as usize]);
        }
        if key.contains("zip") {
            return json!(format!("9{}", 4000 + (seed * 17) % 6000));
        }
        json!(format!("Test Value {}", seed))
    }

    fn number_value(&self, field: &InputField, seed: i64) -> Value {
        let validate = field.validate.as_ref();
        let min = validate
            .and_then(|v| v.min)
            .unwrap_or(self.options.number_min);
        let max = validate
            .and_then(|v| v.max)
            .unwrap_or(self.options.number_max);
        // Inverted bounds would make the span non-positive; fall back to a
        // single-value range instead of a modulo-by-zero panic.
        let span = (max - min + 1).max(1);
        json!(min + (seed * 17) % span)
    }
}

fn choice_value(field: &InputField, seed: i64) -> Value {
    match field.values.as_deref() {
        Some(values) if !values.is_empty() => {
            json!(values[(seed % values.len() as i64) as usize].value)
        }
        _ => json!(format!("Option {}", seed)),
    }
}

fn phone_number(seed: i64) -> String {
    format!(
        "(415) {}-{}",
        500 + (seed * 11) % 500,
        1000 + (seed * 13) % 9000
    )
}
