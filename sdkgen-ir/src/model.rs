//! Generated data models.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::TypeNode;

/// One field of a generated model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelField {
    /// Field name as it appears on the wire.
    pub name: String,
    /// Resolved type. Optional fields are wrapped in [`TypeNode::Optional`].
    pub ty: TypeNode,
    pub required: bool,
    /// Documentation copied verbatim from the field description.
    pub doc: Option<String>,
}

impl ModelField {
    /// Create a field, wrapping the type as nullable when not required.
    pub fn new(name: impl Into<String>, ty: TypeNode, required: bool) -> Self {
        let ty = if required { ty } else { TypeNode::optional(ty) };
        Self {
            name: name.into(),
            ty,
            required,
            doc: None,
        }
    }

    pub fn doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc.filter(|d| !d.is_empty());
        self
    }
}

/// A generated struct/class model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructModel {
    pub name: String,
    pub doc: Option<String>,
    /// Required fields first, then optional ones, each in declaration order.
    pub fields: Vec<ModelField>,
    /// Names of the models, enums and unions the fields refer to.
    pub dependencies: BTreeSet<String>,
}

impl StructModel {
    pub fn required_fields(&self) -> impl Iterator<Item = &ModelField> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn optional_fields(&self) -> impl Iterator<Item = &ModelField> {
        self.fields.iter().filter(|f| !f.required)
    }

    pub fn uses_temporal(&self) -> bool {
        self.fields.iter().any(|f| f.ty.uses_temporal())
    }
}

/// One member of a generated enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    /// Member identifier, e.g. `IN_PROGRESS`.
    pub ident: String,
    /// Underlying wire value, e.g. `in-progress`.
    pub value: String,
}

/// How the values of an enum travel on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumRepr {
    #[default]
    String,
    /// Every value is an integer and is sent as a JSON number.
    Integer,
}

impl EnumRepr {
    pub fn is_string(&self) -> bool {
        *self == Self::String
    }
}

/// A generated enum. Member values keep their textual form whatever the
/// wire representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumModel {
    pub name: String,
    pub doc: Option<String>,
    pub members: Vec<EnumMember>,
    #[serde(skip_serializing_if = "EnumRepr::is_string")]
    pub repr: EnumRepr,
}

/// Any registered model symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelDef {
    Struct(StructModel),
    Enum(EnumModel),
}

impl ModelDef {
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(model) => &model.name,
            Self::Enum(model) => &model.name,
        }
    }

    pub fn as_struct(&self) -> Option<&StructModel> {
        match self {
            Self::Struct(model) => Some(model),
            Self::Enum(_) => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumModel> {
        match self {
            Self::Enum(model) => Some(model),
            Self::Struct(_) => None,
        }
    }
}
