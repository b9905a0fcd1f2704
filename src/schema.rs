//! Schema Assembler: composes the final function-schema document.

use serde::Serialize;
use serde_json::Value;

use crate::error::SchemaError;
use crate::model::{parameters_schema, returns_schema};
use crate::signature::Signature;

/// The assembled schema for one callable, ready for serialization.
///
/// `description` is present only when the callable carries a non-empty doc
/// string; `returns` only when the caller opted in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSchema {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<Value>,
}

impl FunctionSchema {
    pub fn to_value(&self) -> Result<Value, SchemaError> {
        serde_json::to_value(self).map_err(|err| SchemaError::SchemaGeneration(err.to_string()))
    }
}

/// Derives the function schema for a callable's signature.
///
/// Pure function of the signature; nothing is cached across calls.
pub fn generate_schema<S: Signature + ?Sized>(
    sig: &S,
    include_returns: bool,
) -> Result<FunctionSchema, SchemaError> {
    let parameters = parameters_schema(sig)?;
    let description = sig
        .doc()
        .map(cleandoc)
        .filter(|cleaned| !cleaned.is_empty());
    let returns = if include_returns {
        Some(returns_schema(sig)?)
    } else {
        None
    };
    Ok(FunctionSchema {
        name: sig.name().to_string(),
        description,
        parameters,
        returns,
    })
}

/// Normalizes a doc string: the first line loses its leading whitespace,
/// continuation lines lose their common indentation margin, and blank edges
/// are trimmed away.
fn cleandoc(doc: &str) -> String {
    let lines: Vec<&str> = doc.lines().collect();
    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        if index == 0 {
            cleaned.push(line.trim_start().to_string());
        } else {
            let mut stripped = 0;
            let rest: String = line
                .chars()
                .skip_while(|c| {
                    if stripped < margin && c.is_whitespace() {
                        stripped += 1;
                        true
                    } else {
                        false
                    }
                })
                .collect();
            cleaned.push(rest);
        }
    }
    cleaned.join("\n").trim().to_string()
}
