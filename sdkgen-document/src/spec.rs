//! Normalized API description shared by both document flavors.

use indexmap::{IndexMap, IndexSet};
use sdkgen_ir::HttpMethod;
use serde::Serialize;

/// Which kind of document an [`ApiSpec`] was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// `{"groups": {<group>: [<method>, ...]}}`
    Legacy,
    /// `components.schemas` + `paths`
    OpenApi,
}

/// A loaded API document.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSpec {
    pub flavor: Flavor,
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    /// Named schemas in document order.
    pub schemas: IndexMap<String, SchemaDefinition>,
    /// Endpoints in document order.
    pub endpoints: Vec<EndpointSpec>,
}

impl ApiSpec {
    pub fn schema(&self, name: &str) -> Option<&SchemaDefinition> {
        self.schemas.get(name)
    }
}

/// A named schema definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaDefinition {
    pub name: String,
    pub description: Option<String>,
    pub object: ObjectSpec,
    /// Set when the schema names something other than an object, e.g. a
    /// top-level string enum or an array.
    pub alias: Option<FieldSpec>,
}

/// Ordered properties plus the set of required property names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectSpec {
    pub properties: IndexMap<String, FieldSpec>,
    pub required: IndexSet<String>,
}

impl ObjectSpec {
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }
}

/// Raw attributes of one field or parameter.
///
/// The attributes are kept as written; deciding what kind of type they
/// describe is left to the type resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Declared type string as written (`integer`, `integer/string`, ...).
    pub ty: Option<String>,
    pub format: Option<String>,
    /// Name of a referenced schema.
    pub reference: Option<String>,
    /// Inline object properties.
    pub properties: Option<ObjectSpec>,
    /// Array item specification.
    pub items: Option<Box<FieldSpec>>,
    /// Distinct enum values in declaration order, in string form.
    pub enum_values: Vec<String>,
    /// `oneOf`/`anyOf` alternatives.
    pub alternatives: Vec<FieldSpec>,
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn of_type(ty: impl Into<String>) -> Self {
        Self {
            ty: Some(ty.into()),
            ..Default::default()
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            reference: Some(name.into()),
            ..Default::default()
        }
    }

    /// The declared type, or `""` when none was given.
    pub fn type_name(&self) -> &str {
        self.ty.as_deref().unwrap_or_default()
    }
}

/// Declared location of a parameter in a schema/paths document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamIn {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParamIn {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

/// One endpoint parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    /// Declared location; legacy documents leave this empty.
    pub location: Option<ParamIn>,
    pub required: bool,
    pub schema: FieldSpec,
    pub description: Option<String>,
}

/// A declared JSON request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    pub schema: FieldSpec,
    pub required: bool,
    pub description: Option<String>,
}

/// One documented endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointSpec {
    pub path: String,
    pub method: HttpMethod,
    /// Group or first tag. `None` for untagged schema endpoints.
    pub group: Option<String>,
    pub operation_id: Option<String>,
    pub description: Option<String>,
    pub params: Vec<ParamSpec>,
    pub request_body: Option<RequestBody>,
    /// Response schema per status code (`"200"`, `"default"`, ...).
    pub responses: IndexMap<String, Option<FieldSpec>>,
}

/// Collect distinct enum values in their string form, keeping first-seen order.
pub(crate) fn enum_strings(values: &[serde_json::Value]) -> Vec<String> {
    let mut seen = IndexSet::new();
    for value in values {
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => continue,
            other => other.to_string(),
        };
        seen.insert(text);
    }
    seen.into_iter().collect()
}

/// Drop blank descriptions.
pub(crate) fn clean_doc(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_enum_strings_dedup_and_stringify() {
        let values = [json!("Open"), json!(1), json!("Open"), json!(true), json!(null)];
        assert_eq!(enum_strings(&values), vec!["Open", "1", "true"]);
    }

    #[test]
    fn test_param_in_parse() {
        assert_eq!(ParamIn::parse("Query"), Some(ParamIn::Query));
        assert_eq!(ParamIn::parse("body"), None);
    }

    #[test]
    fn test_clean_doc() {
        assert_eq!(clean_doc(Some("  ".into())), None);
        assert_eq!(clean_doc(Some(" id ".into())), Some(" id ".into()));
    }
}
