//! The core generation engine: schema traversal, value synthesis,
//! conditional resolution, and test set assembly.

pub mod assembler;
pub mod conditional;
pub mod synthesizer;
pub mod walker;

#[cfg(test)]
mod assembler_test;

use serde_json::Value;

use crate::config::GenerationSettings;
use crate::domain::error::{GenerationError, GenerationResult};
use crate::domain::form::TestSet;

/// Run the full local pipeline over one schema document.
///
/// Distinguishes the two user-visible failure modes: a document that is
/// not a form schema at all (`InvalidSchema`) and one that parsed but
/// yielded no usable fields (`NoFieldsFound`).
pub fn generate_local(
    schema: &Value,
    number_of_sets: usize,
    settings: &GenerationSettings,
) -> GenerationResult<Vec<TestSet>> {
    if walker::root_components(schema).is_none() {
        return Err(GenerationError::InvalidSchema);
    }
    let parsed = walker::walk(schema);
    if parsed.fields.is_empty() {
        return Err(GenerationError::NoFieldsFound);
    }
    tracing::debug!(
        panels = parsed.panels.len(),
        fields = parsed.fields.len(),
        "parsed form schema"
    );
    Ok(assembler::TestSetAssembler::new(settings).assemble(&parsed, number_of_sets))
}
