//! Invoker: JSON arguments in, the callable's return value out.
//!
//! Validation is delegated to the `jsonschema` crate at draft 2020-12.
//! Exactly one validation pass happens per invocation, and it reports every
//! violated field, never just the first.

use jsonschema::{Draft, Validator};
use serde_json::{Map, Value};

use crate::error::{SchemaError, Violation};
use crate::model::parameters_schema;
use crate::signature::{Callable, Signature};

fn compile(schema: &Value) -> Result<Validator, SchemaError> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| SchemaError::SchemaGeneration(format!("invalid schema: {err}")))
}

/// Validates `arguments` against the callable's parameter model, then
/// invokes the callable with the validated values as keyword arguments.
///
/// Declared defaults fill in absent optional parameters; keys not named by
/// any parameter are dropped. The callable's own result, success or
/// failure, passes through unchanged.
pub fn call(callable: &Callable, arguments: &Value) -> Result<Value, SchemaError> {
    let schema = parameters_schema(callable)?;
    let validator = compile(&schema)?;

    let violations: Vec<Violation> = validator
        .iter_errors(arguments)
        .map(|err| Violation::new(err.instance_path().to_string(), err.to_string()))
        .collect();
    if !violations.is_empty() {
        return Err(SchemaError::Validation { violations });
    }

    // The parameter model is an object schema, so a passing payload is
    // always an object.
    let Value::Object(supplied) = arguments else {
        return Err(SchemaError::Validation {
            violations: vec![Violation::new("", "arguments must be a JSON object")],
        });
    };

    let mut args = Map::new();
    for param in callable.params() {
        if let Some(value) = supplied.get(&param.name) {
            args.insert(param.name.clone(), value.clone());
        } else if let Some(default) = &param.default {
            args.insert(param.name.clone(), default.clone());
        }
    }
    callable.invoke(&args)
}

/// Reports whether `value` conforms to `schema` at draft 2020-12.
pub fn validate_returns(value: &Value, schema: &Value) -> Result<bool, SchemaError> {
    Ok(compile(schema)?.is_valid(value))
}
