#![deny(unsafe_code)]

//! Derive a JSON Schema (draft 2020-12) for a callable's parameters and,
//! optionally, its return value — and go the other way: validate a JSON
//! object against that schema and invoke the callable with the result.
//!
//! ```rust
//! use fn_schema::prelude::*;
//!
//! let add = Callable::new("add", |args| {
//!     let a = args["a"].as_i64().unwrap_or(0);
//!     let b = args["b"].as_i64().unwrap_or(0);
//!     Ok(json!(a + b))
//! })
//! .with_doc("Adds two integers.")
//! .param("a", TypeDescriptor::integer())
//! .param_with_default("b", TypeDescriptor::integer(), json!(1))
//! .returning(TypeDescriptor::integer());
//!
//! let schema = generate_schema(&add, true)?;
//! assert_eq!(schema.name, "add");
//!
//! let result = call(&add, &json!({"a": 41}))?;
//! assert_eq!(result, json!(42));
//! # Ok::<(), fn_schema::SchemaError>(())
//! ```
//!
//! Everything is synchronous and stateless per call: schemas are derived
//! afresh from the signature each time, so concurrent use needs no
//! coordination.

mod descriptor;
mod error;
mod invoke;
mod mapper;
mod model;
pub mod prelude;
mod schema;
mod signature;

pub use descriptor::{FieldSpec, ParameterSpec, PrimitiveKind, TypeDescriptor};
pub use error::{SchemaError, Violation};
pub use invoke::{call, validate_returns};
pub use model::{RETURNS_KEY, parameters_schema, returns_schema};
pub use schema::{FunctionSchema, generate_schema};
pub use signature::{Callable, CallableFn, Signature};
