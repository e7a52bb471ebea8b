//! Data model for form.io-style schemas and generated test data.
//!
//! A schema document is a tree of "components". Containers (panels,
//! fieldsets, columns) carry a `components` array; leaf inputs carry a
//! `type` tag from a fixed registry. The walker normalizes leaves into
//! [`InputField`] descriptors; everything downstream operates on those.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The closed registry of leaf input types the panel-based extraction
/// recognizes. Tags outside this set are dropped by that path (the flat
/// prompt extraction has its own inclusion rule and keeps the raw tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    TextField,
    TextArea,
    Number,
    Password,
    Email,
    Checkbox,
    SelectBoxes,
    Select,
    Radio,
    DateTime,
    Day,
    Time,
    PhoneNumber,
    Address,
    Signature,
}

impl FieldKind {
    /// Map a schema `type` tag to a kind. Returns `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "textfield" => Some(Self::TextField),
            "textarea" => Some(Self::TextArea),
            "number" => Some(Self::Number),
            "password" => Some(Self::Password),
            "email" => Some(Self::Email),
            "checkbox" => Some(Self::Checkbox),
            "selectboxes" => Some(Self::SelectBoxes),
            "select" => Some(Self::Select),
            "radio" => Some(Self::Radio),
            "datetime" => Some(Self::DateTime),
            "day" => Some(Self::Day),
            "time" => Some(Self::Time),
            "phoneNumber" => Some(Self::PhoneNumber),
            "address" => Some(Self::Address),
            "signature" => Some(Self::Signature),
            _ => None,
        }
    }
}

/// Declarative validation constraints attached to a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Validation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// One `{label, value}` option pair for choice-type fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// Conditional visibility spec: show (or hide) this field when the
/// controlling field `when` carries the value `eq`.
///
/// `eq` is kept as a raw JSON value because schemas use both strings and
/// booleans; the resolver only ever matches those two shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Conditional {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eq: Option<Value>,
}

/// Normalized descriptor for one leaf input field.
///
/// `key` is dot-qualified (`panelKey.fieldKey`) when the field was found
/// under a panel; qualified keys are unique within one parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputField {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Conditional>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<Validation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<FieldOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
}

impl InputField {
    /// The last segment of the qualified key, used as the record key in
    /// generated field maps.
    pub fn short_key(&self) -> &str {
        self.key.rsplit('.').next().unwrap_or(&self.key)
    }

    pub fn kind(&self) -> Option<FieldKind> {
        FieldKind::from_tag(&self.field_type)
    }
}

/// A named grouping of fields, explicit in the schema or synthesized as
/// the default panel when the document declares none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPanel {
    pub title: String,
    pub key: String,
}

/// Result of the panel-based extraction: panels plus the flat, document-
/// ordered list of field descriptors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedForm {
    pub panels: Vec<FormPanel>,
    pub fields: Vec<InputField>,
}

impl ParsedForm {
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty() && self.fields.is_empty()
    }
}

/// Generated values for one panel within one test set, keyed by the
/// field's short key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelData {
    pub title: String,
    pub fields: Map<String, Value>,
}

/// One complete synthesized form submission, grouped by panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSet {
    pub panels: Vec<PanelData>,
}
