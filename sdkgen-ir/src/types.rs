//! Language-agnostic type expressions.

use std::collections::BTreeSet;

use serde::Serialize;

/// Primitive kinds a field can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    String,
    Int,
    Float,
    Bool,
    Date,
    DateTime,
}

impl Primitive {
    /// Get the canonical name of this primitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::DateTime => "datetime",
        }
    }

    /// Returns true for the temporal kinds.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

/// A resolved type expression.
///
/// Types are represented semantically and rendered per target language by a
/// `TypeMapper`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeNode {
    /// A primitive kind.
    Primitive(Primitive),
    /// Untyped passthrough, used when nothing more specific is known.
    Any,
    /// A generated model.
    Model(String),
    /// A generated enum.
    Enum(String),
    /// A list of the inner type.
    List(Box<TypeNode>),
    /// A nullable value with an absent default.
    Optional(Box<TypeNode>),
    /// One of several alternatives. `name` is the symbol a backend may use
    /// when the target language has no anonymous unions.
    Union { name: String, members: Vec<TypeNode> },
}

impl TypeNode {
    pub fn primitive(ty: Primitive) -> Self {
        Self::Primitive(ty)
    }

    pub fn string() -> Self {
        Self::Primitive(Primitive::String)
    }

    pub fn int() -> Self {
        Self::Primitive(Primitive::Int)
    }

    pub fn float() -> Self {
        Self::Primitive(Primitive::Float)
    }

    pub fn bool() -> Self {
        Self::Primitive(Primitive::Bool)
    }

    pub fn model(name: impl Into<String>) -> Self {
        Self::Model(name.into())
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    pub fn list(inner: TypeNode) -> Self {
        Self::List(Box::new(inner))
    }

    /// Wrap in `Optional`. Already optional types are returned unchanged.
    pub fn optional(inner: TypeNode) -> Self {
        match inner {
            Self::Optional(_) => inner,
            other => Self::Optional(Box::new(other)),
        }
    }

    pub fn union(name: impl Into<String>, members: Vec<TypeNode>) -> Self {
        Self::Union {
            name: name.into(),
            members,
        }
    }

    /// Check if this type is optional.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Check if this type is the untyped passthrough.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// The type with any outer `Optional` removed.
    pub fn non_optional(&self) -> &TypeNode {
        match self {
            Self::Optional(inner) => inner,
            other => other,
        }
    }

    /// Get the inner type for wrapper types (Optional, List).
    pub fn inner_type(&self) -> Option<&TypeNode> {
        match self {
            Self::Optional(inner) | Self::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// Visit this node and every nested node, outermost first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TypeNode)) {
        f(self);
        match self {
            Self::Optional(inner) | Self::List(inner) => inner.walk(f),
            Self::Union { members, .. } => {
                for member in members {
                    member.walk(f);
                }
            }
            Self::Primitive(_) | Self::Any | Self::Model(_) | Self::Enum(_) => {}
        }
    }

    /// Collect the names of every model, enum and union this type refers to.
    pub fn collect_references(&self, out: &mut BTreeSet<String>) {
        self.walk(&mut |node| match node {
            Self::Model(name) | Self::Enum(name) | Self::Union { name, .. } => {
                out.insert(name.clone());
            }
            _ => {}
        });
    }

    /// Check whether a temporal primitive appears anywhere in this type.
    pub fn uses_temporal(&self) -> bool {
        let mut found = false;
        self.walk(&mut |node| {
            if let Self::Primitive(p) = node {
                found |= p.is_temporal();
            }
        });
        found
    }
}
