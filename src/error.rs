//! Error taxonomy for schema generation and invocation.

use std::fmt;

use thiserror::Error;

/// Errors surfaced by schema generation and invocation.
///
/// Every variant propagates to the immediate caller; nothing is retried,
/// downgraded, or emitted as a partial schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A parameter has no type descriptor. Fixing the callable's annotations
    /// is the only recovery.
    #[error(
        "`{func}` parameter `{param}` has no type annotation, please provide one to generate the function specification"
    )]
    MissingAnnotation { func: String, param: String },

    /// A returns schema was requested but the callable declares no return
    /// type.
    #[error(
        "`{func}` has no return annotation, please provide one to generate the function specification"
    )]
    MissingReturnAnnotation { func: String },

    /// The mapper cannot classify a type descriptor.
    #[error("unsupported type descriptor: {0}")]
    UnsupportedType(String),

    /// Schema generation failed, e.g. heterogeneous literal values.
    #[error("schema generation failed: {0}")]
    SchemaGeneration(String),

    /// Incoming JSON failed schema validation. Carries every violated field
    /// from the single validation pass, not just the first.
    #[error("invalid arguments: {}", render_violations(.violations))]
    Validation { violations: Vec<Violation> },

    /// The callable itself failed during invocation.
    #[error("callable error: {0}")]
    Runtime(String),
}

/// One violated field from a validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// JSON pointer to the offending value. Empty for the document root.
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
