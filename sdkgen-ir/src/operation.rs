//! Generated API operations.

use std::fmt;

use serde::Serialize;

use crate::TypeNode;

/// HTTP verbs an operation can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
    ];

    /// Uppercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Parse a verb case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Verbs whose non-path parameters travel in the query string.
    pub fn sends_query(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an operation parameter travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamLocation {
    /// Substituted into a `{name}` placeholder.
    Path,
    /// Sent in the query string.
    Query,
    /// One entry of the body mapping.
    BodyField,
    /// The whole body mapping.
    Body,
}

impl ParamLocation {
    pub fn is_body(&self) -> bool {
        matches!(self, Self::BodyField | Self::Body)
    }
}

/// A formal parameter of a generated operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationParam {
    /// Name as it appears on the wire.
    pub name: String,
    /// Resolved type; optional parameters are wrapped in `Optional`.
    pub ty: TypeNode,
    pub required: bool,
    pub location: ParamLocation,
    pub doc: Option<String>,
}

/// What an operation returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// A key-value result is converted into this model.
    Model(String),
    /// The raw result is returned unchanged.
    Passthrough,
}

impl ResponseType {
    pub fn model_name(&self) -> Option<&str> {
        match self {
            Self::Model(name) => Some(name),
            Self::Passthrough => None,
        }
    }
}

/// One generated callable bound to a verb and path template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub doc: Option<String>,
    /// Required parameters first, then optional ones.
    pub params: Vec<OperationParam>,
    pub response: ResponseType,
}

impl Operation {
    pub fn params_in(&self, location: ParamLocation) -> impl Iterator<Item = &OperationParam> {
        self.params.iter().filter(move |p| p.location == location)
    }

    pub fn path_params(&self) -> impl Iterator<Item = &OperationParam> {
        self.params_in(ParamLocation::Path)
    }

    pub fn query_params(&self) -> impl Iterator<Item = &OperationParam> {
        self.params_in(ParamLocation::Query)
    }

    pub fn body_fields(&self) -> impl Iterator<Item = &OperationParam> {
        self.params_in(ParamLocation::BodyField)
    }

    /// The aggregated body parameter, if the operation takes one.
    pub fn body(&self) -> Option<&OperationParam> {
        self.params_in(ParamLocation::Body).next()
    }

    pub fn uses_temporal(&self) -> bool {
        self.params.iter().any(|p| p.ty.uses_temporal())
    }
}
