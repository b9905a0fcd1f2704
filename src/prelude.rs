//! Convenient re-exports for common usage patterns.
//!
//! ```rust
//! use fn_schema::prelude::*;
//! ```

// Core operations
pub use crate::{call, generate_schema, parameters_schema, returns_schema, validate_returns};

// Essential types
pub use crate::{
    Callable, FieldSpec, FunctionSchema, ParameterSpec, SchemaError, Signature, TypeDescriptor,
    Violation,
};

// Commonly used external types
pub use serde_json::{Value, json};
