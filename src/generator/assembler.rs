//! Test set assembly: panels x fields x requested set count.

use serde_json::Map;

use crate::config::GenerationSettings;
use crate::domain::form::{PanelData, ParsedForm, TestSet};
use crate::generator::conditional;
use crate::generator::synthesizer::{SynthesisOptions, ValueSynthesizer};

/// Orchestrates synthesis over a parsed form.
pub struct TestSetAssembler {
    synthesizer: ValueSynthesizer,
    default_sets: usize,
}

impl TestSetAssembler {
    pub fn new(settings: &GenerationSettings) -> Self {
        Self::with_synthesizer(
            ValueSynthesizer::new(SynthesisOptions {
                number_min: settings.number_min,
                number_max: settings.number_max,
            }),
            settings.default_sets,
        )
    }

    /// Construct around an existing synthesizer (tests pass one with a
    /// fixed clock).
    pub fn with_synthesizer(synthesizer: ValueSynthesizer, default_sets: usize) -> Self {
        Self {
            synthesizer,
            default_sets,
        }
    }

    /// Build `number_of_sets` complete test sets, then run conditional
    /// resolution once over the whole batch. A zero request falls back to
    /// the configured default count. Never returns a partial batch.
    pub fn assemble(&self, parsed: &ParsedForm, number_of_sets: usize) -> Vec<TestSet> {
        let count = if number_of_sets == 0 {
            self.default_sets
        } else {
            number_of_sets
        };

        let mut sets = Vec::with_capacity(count);
        for index in 0..count {
            let mut panels = Vec::with_capacity(parsed.panels.len());
            for panel in &parsed.panels {
                let prefix = format!("{}.", panel.key);
                let mut fields = Map::new();
                for field in parsed
                    .fields
                    .iter()
                    .filter(|f| f.key.starts_with(&prefix) || f.key == panel.key)
                {
                    fields.insert(
                        field.short_key().to_string(),
                        self.synthesizer.synthesize(field, index),
                    );
                }
                panels.push(PanelData {
                    title: panel.title.clone(),
                    fields,
                });
            }
            sets.push(TestSet { panels });
        }

        conditional::resolve(sets, &parsed.fields)
    }
}
