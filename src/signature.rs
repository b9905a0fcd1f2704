//! The reflection collaborator.
//!
//! Schema generation never inspects a live function directly; it talks to a
//! [`Signature`]: an ordered parameter list, an optional return descriptor,
//! and an optional doc string. Any reflection layer that can produce those
//! plugs in here, and tests can mock one trivially.
//!
//! [`Callable`] is the concrete signature used by the invoker: a signature
//! plus a boxed synchronous function taking the validated argument object.

use std::fmt;

use serde_json::{Map, Value};

use crate::descriptor::{ParameterSpec, TypeDescriptor};
use crate::error::SchemaError;

/// Everything schema generation needs to know about a callable.
pub trait Signature {
    fn name(&self) -> &str;
    fn doc(&self) -> Option<&str>;
    fn params(&self) -> &[ParameterSpec];
    fn returns(&self) -> Option<&TypeDescriptor>;
}

/// The invocation target: keyword-style arguments in, JSON value out.
pub type CallableFn =
    Box<dyn Fn(&Map<String, Value>) -> Result<Value, SchemaError> + Send + Sync>;

/// A callable with a declared signature, built up in declaration order.
pub struct Callable {
    name: String,
    doc: Option<String>,
    params: Vec<ParameterSpec>,
    returns: Option<TypeDescriptor>,
    f: CallableFn,
}

impl Callable {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Result<Value, SchemaError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
            returns: None,
            f: Box::new(f),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.params.push(ParameterSpec::new(name, ty));
        self
    }

    pub fn param_with_default(
        mut self,
        name: impl Into<String>,
        ty: TypeDescriptor,
        default: Value,
    ) -> Self {
        self.params.push(ParameterSpec::with_default(name, ty, default));
        self
    }

    /// A parameter without a type descriptor. Schema generation rejects it.
    pub fn param_untyped(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParameterSpec::untyped(name));
        self
    }

    pub fn returning(mut self, ty: TypeDescriptor) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Calls the function with already-validated keyword arguments.
    pub fn invoke(&self, args: &Map<String, Value>) -> Result<Value, SchemaError> {
        (self.f)(args)
    }
}

impl Signature for Callable {
    fn name(&self) -> &str {
        &self.name
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    fn returns(&self) -> Option<&TypeDescriptor> {
        self.returns.as_ref()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}
