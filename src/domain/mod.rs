//! Core domain types: the form schema data model and error taxonomy.

pub mod error;
pub mod form;

pub use error::{BackendError, GenerationError, GenerationResult};
pub use form::{
    Conditional, FieldKind, FieldOption, FormPanel, InputField, PanelData, ParsedForm, TestSet,
    Validation,
};
