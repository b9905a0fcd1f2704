//! Parameter and Returns Model Builders.
//!
//! The parameter model is the object schema a callable's arguments must
//! satisfy. The returns model reuses the same machinery by wrapping the
//! return descriptor as one synthetic field, then unwrapping the wrapper
//! artifacts so the bare return fragment remains.

use serde_json::{Map, Value, json};

use crate::descriptor::ParameterSpec;
use crate::error::SchemaError;
use crate::mapper::{DEFS_KEY, Definitions, map_type, strip_titles};
use crate::signature::Signature;

/// Reserved name for the synthetic field wrapping a return type.
pub const RETURNS_KEY: &str = "returns";

/// Builds the object schema for a callable's parameters.
///
/// A parameter is required iff it declares no default value; the `required`
/// list is omitted entirely when empty. An unannotated parameter is a
/// definition error, never an implicit "any".
pub fn parameters_schema<S: Signature + ?Sized>(sig: &S) -> Result<Value, SchemaError> {
    let mut defs = Definitions::new();
    let mut properties = Map::new();
    let mut required: Vec<Value> = Vec::new();

    for param in sig.params() {
        let ty = param.ty.as_ref().ok_or_else(|| SchemaError::MissingAnnotation {
            func: sig.name().to_string(),
            param: param.name.clone(),
        })?;
        let mut fragment = map_type(ty, &mut defs)?;
        if let Some(default) = &param.default {
            if let Value::Object(obj) = &mut fragment {
                obj.insert("default".to_string(), default.clone());
            }
        } else {
            required.push(Value::String(param.name.clone()));
        }
        properties.insert(param.name.clone(), fragment);
    }

    let mut out = Map::new();
    if !defs.is_empty() {
        out.insert(DEFS_KEY.to_string(), defs.into_value());
    }
    out.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        out.insert("required".to_string(), Value::Array(required));
    }
    out.insert("type".to_string(), json!("object"));

    let mut schema = Value::Object(out);
    strip_titles(&mut schema);
    Ok(schema)
}

/// Builds the schema fragment for a callable's return type.
///
/// The return descriptor is wrapped as a single required synthetic field
/// and pushed through [`parameters_schema`], which handles `$defs` sharing
/// for free. The unwrap then merges that property's fragment over the
/// wrapper and strips the wrapper artifacts: `required` always, `type`
/// when it is the synthetic `"object"`. Any `$defs` sibling survives so
/// `$ref`s stay resolvable.
pub fn returns_schema<S: Signature + ?Sized>(sig: &S) -> Result<Value, SchemaError> {
    let ret = sig.returns().ok_or_else(|| SchemaError::MissingReturnAnnotation {
        func: sig.name().to_string(),
    })?;

    let wrapper = ReturnsSignature {
        name: sig.name(),
        params: [ParameterSpec::new(RETURNS_KEY, ret.clone())],
    };
    let schema = parameters_schema(&wrapper)?;

    let Value::Object(mut unwrapped) = schema else {
        return Err(SchemaError::SchemaGeneration(
            "returns model did not produce an object schema".to_string(),
        ));
    };
    let fragment = unwrapped
        .remove("properties")
        .and_then(|mut props| {
            props
                .as_object_mut()
                .and_then(|props| props.remove(RETURNS_KEY))
        })
        .ok_or_else(|| {
            SchemaError::SchemaGeneration(
                "returns model is missing its synthetic property".to_string(),
            )
        })?;
    if let Value::Object(fragment) = fragment {
        for (key, value) in fragment {
            unwrapped.insert(key, value);
        }
    }
    unwrapped.remove("required");
    if unwrapped.get("type").and_then(Value::as_str) == Some("object") {
        unwrapped.remove("type");
    }
    Ok(Value::Object(unwrapped))
}

/// Transient signature holding the synthetic returns field. Internal to the
/// unwrapping step, never exposed.
struct ReturnsSignature<'a> {
    name: &'a str,
    params: [ParameterSpec; 1],
}

impl Signature for ReturnsSignature<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn doc(&self) -> Option<&str> {
        None
    }

    fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    fn returns(&self) -> Option<&crate::descriptor::TypeDescriptor> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldSpec, TypeDescriptor};
    use crate::signature::Callable;

    fn callable(name: &'static str) -> Callable {
        Callable::new(name, |_| Ok(Value::Null))
    }

    #[test]
    fn test_parameters_schema_requires_annotations() {
        let f = callable("annotate_me").param_untyped("a");
        let err = parameters_schema(&f).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingAnnotation {
                func: "annotate_me".to_string(),
                param: "a".to_string(),
            }
        );
    }

    #[test]
    fn test_parameters_schema_empty() {
        let f = callable("nullary");
        assert_eq!(
            parameters_schema(&f).unwrap(),
            json!({"properties": {}, "type": "object"})
        );
    }

    #[test]
    fn test_returns_schema_requires_annotation() {
        let f = callable("no_return");
        let err = returns_schema(&f).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingReturnAnnotation {
                func: "no_return".to_string(),
            }
        );
    }

    #[test]
    fn test_returns_schema_unwraps_primitive() {
        let f = callable("stringy").returning(TypeDescriptor::string());
        assert_eq!(returns_schema(&f).unwrap(), json!({"type": "string"}));
    }

    #[test]
    fn test_returns_schema_drops_object_type_of_mapping_return() {
        // A mapping return unwraps to a fragment with no `type` key; the
        // wrapper's `object` marker is indistinguishable from the real one.
        let f = callable("dictionary").returning(TypeDescriptor::mapping(TypeDescriptor::integer()));
        assert_eq!(returns_schema(&f).unwrap(), json!({}));
    }

    #[test]
    fn test_returns_schema_keeps_defs_for_structured_return() {
        let f = callable("make_point").returning(TypeDescriptor::structured(
            "Point",
            vec![
                FieldSpec::new("x", TypeDescriptor::integer()),
                FieldSpec::new("y", TypeDescriptor::integer()),
            ],
        ));
        assert_eq!(
            returns_schema(&f).unwrap(),
            json!({
                "$defs": {
                    "Point": {
                        "type": "object",
                        "properties": {
                            "x": {"type": "integer"},
                            "y": {"type": "integer"}
                        },
                        "required": ["x", "y"]
                    }
                },
                "$ref": "#/$defs/Point"
            })
        );
    }
}
