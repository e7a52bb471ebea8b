//! Schema traversal: turns a raw form document into panels and field
//! descriptors.
//!
//! Two independent extraction strategies live here and must stay separate,
//! because their inclusion predicates and key qualification differ:
//!
//! - [`walk`] — registry-based, panel-qualified extraction. Drives local
//!   synthesis and the parse-for-display endpoint.
//! - [`prompt_fields`] — flat extraction over `input == true` leaves,
//!   unqualified keys, used only to build the external generator prompt.

use serde_json::Value;

use crate::domain::form::{
    Conditional, FieldKind, FieldOption, FormPanel, InputField, ParsedForm, Validation,
};

const PANEL_TYPE: &str = "panel";
const DEFAULT_PANEL_TITLE: &str = "Form Data";
const DEFAULT_PANEL_KEY: &str = "defaultPanel";
const UNNAMED_PANEL_TITLE: &str = "Unnamed Panel";
const FALLBACK_FIELD_TYPE: &str = "textfield";

/// Closed classification of one schema node. Traversal dispatches on this
/// instead of comparing tag strings at every branch.
enum NodeKind<'a> {
    Panel {
        title: String,
        key: String,
        children: &'a [Value],
    },
    Container(&'a [Value]),
    Leaf(FieldKind),
    Unrecognized,
}

fn classify(node: &Value) -> NodeKind<'_> {
    let tag = node.get("type").and_then(Value::as_str).unwrap_or_default();
    let children = node.get("components").and_then(Value::as_array);

    if tag == PANEL_TYPE {
        return NodeKind::Panel {
            title: node
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(UNNAMED_PANEL_TITLE)
                .to_string(),
            key: node
                .get("key")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            children: children.map(Vec::as_slice).unwrap_or(&[]),
        };
    }
    if let Some(children) = children {
        if !children.is_empty() {
            return NodeKind::Container(children);
        }
    }
    match FieldKind::from_tag(tag) {
        Some(kind) => NodeKind::Leaf(kind),
        None => NodeKind::Unrecognized,
    }
}

/// The root `components` array, or `None` when the document is not a form
/// schema (missing or non-array `components`).
pub fn root_components(schema: &Value) -> Option<&Vec<Value>> {
    schema.get("components").and_then(Value::as_array)
}

/// Panel-based extraction over the whole document.
///
/// Pre-order and stable: panels and fields come out in document order.
/// Malformed input yields an empty result rather than an error; callers
/// distinguish "not a schema" from "schema with nothing usable" via
/// [`root_components`] and `ParsedForm::fields.is_empty()`.
pub fn walk(schema: &Value) -> ParsedForm {
    let Some(root) = root_components(schema) else {
        tracing::debug!("schema has no components array, returning empty parse");
        return ParsedForm::default();
    };

    let mut parsed = ParsedForm::default();
    find_panels(root, "", &mut parsed);

    // No panels anywhere: wrap everything in one synthetic default panel.
    // Fields already collected above carry unqualified keys; re-extract so
    // every descriptor is qualified by the default panel and keys stay
    // unique within this parse.
    if parsed.panels.is_empty() {
        parsed.fields.clear();
        collect_fields(root, DEFAULT_PANEL_KEY, &mut parsed.fields);
        if !parsed.fields.is_empty() {
            parsed.panels.push(FormPanel {
                title: DEFAULT_PANEL_TITLE.to_string(),
                key: DEFAULT_PANEL_KEY.to_string(),
            });
        }
    }

    parsed
}

/// Locate panels depth-first; fields inside a panel are qualified by the
/// panel key, stray leaves outside any panel keep the surrounding
/// qualification (empty at the root).
fn find_panels(components: &[Value], parent_key: &str, parsed: &mut ParsedForm) {
    for node in components {
        match classify(node) {
            NodeKind::Panel {
                title,
                key,
                children,
            } => {
                collect_fields(children, &key, &mut parsed.fields);
                parsed.panels.push(FormPanel { title, key });
            }
            // Non-panel containers (fieldsets, columns) do not alter
            // qualification.
            NodeKind::Container(children) => find_panels(children, parent_key, parsed),
            NodeKind::Leaf(_) => {
                if let Some(field) = descriptor(node, parent_key) {
                    parsed.fields.push(field);
                }
            }
            NodeKind::Unrecognized => {}
        }
    }
}

/// Collect registry leaves under one panel, recursing through nested
/// containers while keeping the panel key as qualifier. A panel nested
/// inside another panel is treated as a plain container: its fields fold
/// into the outer panel and keep the outer key.
fn collect_fields(components: &[Value], panel_key: &str, fields: &mut Vec<InputField>) {
    for node in components {
        match classify(node) {
            NodeKind::Leaf(_) => {
                if let Some(field) = descriptor(node, panel_key) {
                    fields.push(field);
                }
            }
            NodeKind::Container(children) | NodeKind::Panel { children, .. } => {
                collect_fields(children, panel_key, fields)
            }
            NodeKind::Unrecognized => {}
        }
    }
}

/// Flat extraction used only for prompt construction.
///
/// Includes a node iff it carries an explicit `input: true`, has a key,
/// and exposes no nested `components` (leaf-only, regardless of the type
/// registry). Always recurses into any node with a `components` array.
/// Keys stay unqualified; a missing type tag defaults to `textfield`.
pub fn prompt_fields(schema: &Value) -> Vec<InputField> {
    let mut fields = Vec::new();
    if let Some(root) = root_components(schema) {
        collect_prompt_fields(root, &mut fields);
    }
    fields
}

fn collect_prompt_fields(components: &[Value], fields: &mut Vec<InputField>) {
    for node in components {
        let is_input = node.get("input").and_then(Value::as_bool) == Some(true);
        let key = node.get("key").and_then(Value::as_str);
        let children = node.get("components").and_then(Value::as_array);

        if is_input && children.is_none() {
            if let Some(key) = key {
                fields.push(InputField {
                    key: key.to_string(),
                    label: node
                        .get("label")
                        .and_then(Value::as_str)
                        .unwrap_or(key)
                        .to_string(),
                    field_type: node
                        .get("type")
                        .and_then(Value::as_str)
                        .unwrap_or(FALLBACK_FIELD_TYPE)
                        .to_string(),
                    conditional: None,
                    validate: parse_part(node, "validate"),
                    values: option_values(node),
                    multiple: None,
                });
            }
        } else if let Some(children) = children {
            collect_prompt_fields(children, fields);
        }
    }
}

/// Build the normalized descriptor for one registry leaf, qualifying the
/// key with `parent_key` when present. Nodes without a key are dropped.
fn descriptor(node: &Value, parent_key: &str) -> Option<InputField> {
    let key = node.get("key").and_then(Value::as_str)?;
    let qualified = if parent_key.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent_key, key)
    };

    Some(InputField {
        key: qualified,
        label: node
            .get("label")
            .and_then(Value::as_str)
            .unwrap_or(key)
            .to_string(),
        field_type: node
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        conditional: parse_part::<Conditional>(node, "conditional"),
        validate: parse_part::<Validation>(node, "validate"),
        values: option_values(node),
        multiple: node.get("multiple").and_then(Value::as_bool),
    })
}

/// Option pairs from `values`, falling back to `data.values`.
fn option_values(node: &Value) -> Option<Vec<FieldOption>> {
    if let Some(values) = node.get("values") {
        if values.is_array() {
            return serde_json::from_value(values.clone()).ok();
        }
    }
    node.get("data")
        .and_then(|data| data.get("values"))
        .and_then(|values| serde_json::from_value(values.clone()).ok())
}

fn parse_part<T: serde::de::DeserializeOwned>(node: &Value, field: &str) -> Option<T> {
    node.get(field)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}
