//! Type Mapper: `TypeDescriptor` → JSON Schema fragment.
//!
//! Pure leaf of the crate. Every fragment is a plain `serde_json::Value`
//! targeting JSON Schema draft 2020-12. Structured types are emitted once
//! into a shared `$defs` block and referenced by name everywhere else;
//! the [`Definitions`] collector owns that block for one model build.
//!
//! Conventions, applied uniformly:
//! - optionals and unions serialize as `anyOf`, never as multi-value `type`;
//! - `required` lists are omitted when empty, never emitted as `[]`;
//! - list and mapping element types are not embedded (`{"type": "array"}`,
//!   `{"type": "object"}`). Documented limitation of the minimal
//!   introspection mode.

use once_cell::sync::Lazy;
use serde_json::{Map, Value, json};

use crate::descriptor::{FieldSpec, PrimitiveKind, TypeDescriptor};
use crate::error::SchemaError;

pub(crate) const DEFS_KEY: &str = "$defs";

/// Shared-definition collector for a single model build.
///
/// Tracks names currently being defined so a self-referential structured
/// type resolves to its `$ref` instead of re-expanding forever.
#[derive(Debug, Default)]
pub(crate) struct Definitions {
    defs: Map<String, Value>,
    in_progress: Vec<String>,
}

impl Definitions {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Object(self.defs)
    }

    fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name) || self.in_progress.iter().any(|n| n == name)
    }
}

static STRING: Lazy<Value> = Lazy::new(|| json!({ "type": "string" }));
static INTEGER: Lazy<Value> = Lazy::new(|| json!({ "type": "integer" }));
static NUMBER: Lazy<Value> = Lazy::new(|| json!({ "type": "number" }));
static BOOLEAN: Lazy<Value> = Lazy::new(|| json!({ "type": "boolean" }));
static NULL: Lazy<Value> = Lazy::new(|| json!({ "type": "null" }));

fn primitive_fragment(kind: PrimitiveKind) -> Value {
    match kind {
        PrimitiveKind::String => STRING.clone(),
        PrimitiveKind::Integer => INTEGER.clone(),
        PrimitiveKind::Number => NUMBER.clone(),
        PrimitiveKind::Boolean => BOOLEAN.clone(),
        PrimitiveKind::Null => NULL.clone(),
    }
}

/// Maps one type descriptor to a schema fragment, collecting structured
/// definitions into `defs`.
pub(crate) fn map_type(
    ty: &TypeDescriptor,
    defs: &mut Definitions,
) -> Result<Value, SchemaError> {
    match ty {
        TypeDescriptor::Annotated { inner, metadata } => {
            let mut fragment = map_type(inner, defs)?;
            if let Some(description) = join_descriptions(metadata) {
                if let Value::Object(obj) = &mut fragment {
                    // Usage-site description wins over whatever the inner
                    // fragment carried; shared definitions stay untouched.
                    obj.insert("description".to_string(), Value::String(description));
                }
            }
            Ok(fragment)
        }
        TypeDescriptor::Union(members) => map_union(members, defs),
        TypeDescriptor::Literal(values) => map_literal(values),
        TypeDescriptor::List(_) => Ok(json!({ "type": "array" })),
        TypeDescriptor::Mapping(_) => Ok(json!({ "type": "object" })),
        TypeDescriptor::Primitive(kind) => Ok(primitive_fragment(*kind)),
        TypeDescriptor::Structured { name, fields } => map_structured(name, fields, defs),
        TypeDescriptor::Opaque(label) => Err(SchemaError::UnsupportedType(label.clone())),
    }
}

/// Joins string metadata entries with `"; "`; non-string entries are opaque
/// and ignored.
fn join_descriptions(metadata: &[Value]) -> Option<String> {
    let parts: Vec<&str> = metadata.iter().filter_map(Value::as_str).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

fn map_union(members: &[TypeDescriptor], defs: &mut Definitions) -> Result<Value, SchemaError> {
    if members.is_empty() {
        return Err(SchemaError::SchemaGeneration(
            "union has no members".to_string(),
        ));
    }

    // Two members of which exactly one is null: the optional shape. The
    // non-null member always comes first, regardless of declared order.
    if let [a, b] = members {
        let other = match (a.is_null(), b.is_null()) {
            (false, true) => Some(a),
            (true, false) => Some(b),
            _ => None,
        };
        if let Some(other) = other {
            return Ok(json!({
                "anyOf": [map_type(other, defs)?, { "type": "null" }]
            }));
        }
    }

    // General case: declared order, exact duplicates dropped.
    let mut variants: Vec<Value> = Vec::with_capacity(members.len());
    for member in members {
        let fragment = map_type(member, defs)?;
        if !variants.contains(&fragment) {
            variants.push(fragment);
        }
    }
    if variants.len() == 1 {
        return Ok(variants.remove(0));
    }
    Ok(json!({ "anyOf": variants }))
}

fn json_scalar_type(value: &Value) -> Option<&'static str> {
    match value {
        Value::String(_) => Some("string"),
        Value::Bool(_) => Some("boolean"),
        Value::Number(n) => Some(if n.is_i64() || n.is_u64() {
            "integer"
        } else {
            "number"
        }),
        _ => None,
    }
}

fn map_literal(values: &[Value]) -> Result<Value, SchemaError> {
    let first = values.first().ok_or_else(|| {
        SchemaError::SchemaGeneration("literal has no values".to_string())
    })?;
    let scalar_type = json_scalar_type(first).ok_or_else(|| {
        SchemaError::SchemaGeneration(format!("literal value {first} is not a scalar"))
    })?;

    let mut variants: Vec<Value> = Vec::with_capacity(values.len());
    for value in values {
        match json_scalar_type(value) {
            Some(t) if t == scalar_type => {}
            _ => {
                return Err(SchemaError::SchemaGeneration(format!(
                    "literal values mix JSON types: expected {scalar_type}, got {value}"
                )));
            }
        }
        if !variants.contains(value) {
            variants.push(value.clone());
        }
    }
    Ok(json!({ "type": scalar_type, "enum": variants }))
}

fn map_structured(
    name: &str,
    fields: &[FieldSpec],
    defs: &mut Definitions,
) -> Result<Value, SchemaError> {
    if !defs.contains(name) {
        defs.in_progress.push(name.to_string());
        let definition = build_definition(fields, defs);
        defs.in_progress.pop();
        defs.defs.insert(name.to_string(), definition?);
    }
    Ok(json!({ "$ref": format!("#/{DEFS_KEY}/{name}") }))
}

fn build_definition(fields: &[FieldSpec], defs: &mut Definitions) -> Result<Value, SchemaError> {
    let mut properties = Map::new();
    let mut required: Vec<Value> = Vec::new();
    for field in fields {
        let mut fragment = map_type(&field.ty, defs)?;
        if let Some(default) = &field.default {
            if let Value::Object(obj) = &mut fragment {
                obj.insert("default".to_string(), default.clone());
            }
        } else {
            required.push(Value::String(field.name.clone()));
        }
        properties.insert(field.name.clone(), fragment);
    }

    let mut definition = Map::new();
    definition.insert("type".to_string(), json!("object"));
    definition.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        definition.insert("required".to_string(), Value::Array(required));
    }
    Ok(Value::Object(definition))
}

/// Deletes every `title` key, recursively, from a finished model schema.
/// Keeps output minimal and stable for diffing and snapshotting.
pub(crate) fn strip_titles(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("title");
            for nested in map.values_mut() {
                strip_titles(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                strip_titles(item);
            }
        }
        _ => {}
    }
}
