//! Type descriptors for callable signatures.
//!
//! A [`TypeDescriptor`] is the crate's view of a declared type: an opaque
//! handle handed over by whatever reflection layer enumerates a callable's
//! parameters. The mapper turns descriptors into JSON Schema fragments; it
//! never inspects anything beyond the variants modeled here.

use serde_json::Value;

/// JSON Schema primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

/// One field of a [`TypeDescriptor::Structured`] record type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub ty: TypeDescriptor,
    pub default: Option<Value>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, ty: TypeDescriptor, default: Value) -> Self {
        Self {
            name: name.into(),
            ty,
            default: Some(default),
        }
    }
}

/// A declared type, as reported by the reflection collaborator.
///
/// Optional types have no dedicated variant: they are a [`Union`] containing
/// a null member, matching how unions arrive from reflection.
///
/// [`Union`]: TypeDescriptor::Union
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    /// Homogeneous sequence. The element type is retained for callers that
    /// want it, but the mapper emits lists opaquely.
    List(Box<TypeDescriptor>),
    /// String-keyed mapping; the value type is retained but emitted opaquely.
    Mapping(Box<TypeDescriptor>),
    /// Ordered union members, in declared order.
    Union(Vec<TypeDescriptor>),
    /// Ordered scalar values; all must share one JSON primitive type.
    Literal(Vec<Value>),
    /// A type carrying metadata. String metadata entries become the field's
    /// `description`.
    Annotated {
        inner: Box<TypeDescriptor>,
        metadata: Vec<Value>,
    },
    /// A named record type. Emitted once under `$defs` and referenced by
    /// name everywhere it recurs.
    Structured {
        name: String,
        fields: Vec<FieldSpec>,
    },
    /// A descriptor the reflection layer could not classify. Always rejected
    /// by the mapper.
    Opaque(String),
}

impl TypeDescriptor {
    pub fn string() -> Self {
        Self::Primitive(PrimitiveKind::String)
    }

    pub fn integer() -> Self {
        Self::Primitive(PrimitiveKind::Integer)
    }

    pub fn number() -> Self {
        Self::Primitive(PrimitiveKind::Number)
    }

    pub fn boolean() -> Self {
        Self::Primitive(PrimitiveKind::Boolean)
    }

    pub fn null() -> Self {
        Self::Primitive(PrimitiveKind::Null)
    }

    pub fn list(elem: TypeDescriptor) -> Self {
        Self::List(Box::new(elem))
    }

    pub fn mapping(value: TypeDescriptor) -> Self {
        Self::Mapping(Box::new(value))
    }

    pub fn union(members: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::Union(members.into_iter().collect())
    }

    /// `inner | null`, the common optional shape.
    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::Union(vec![inner, Self::null()])
    }

    pub fn literal(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Literal(values.into_iter().collect())
    }

    pub fn structured(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self::Structured {
            name: name.into(),
            fields,
        }
    }

    pub fn annotated(inner: TypeDescriptor, metadata: Vec<Value>) -> Self {
        Self::Annotated {
            inner: Box::new(inner),
            metadata,
        }
    }

    /// Annotate a type with a description.
    pub fn doc(inner: TypeDescriptor, description: impl Into<String>) -> Self {
        Self::annotated(inner, vec![Value::String(description.into())])
    }

    pub(crate) fn is_null(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveKind::Null))
    }
}

/// One parameter of a callable: a name, an optional type descriptor, and an
/// optional default value. A missing descriptor is a definition error at
/// schema-generation time, never an implicit "any".
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: Option<TypeDescriptor>,
    pub default: Option<Value>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, ty: TypeDescriptor, default: Value) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            default: Some(default),
        }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
        }
    }
}
