//! Legacy grouped-methods documents.
//!
//! ```json
//! {"groups": {"projects": [{"path": "/projects/{id}", "method": "GET",
//!   "request_params": [...], "response_params": [...]}]}}
//! ```

use indexmap::IndexMap;
use sdkgen_core::{capitalize, to_pascal_case};
use sdkgen_ir::HttpMethod;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    ApiSpec, EndpointSpec, FieldSpec, Flavor, ObjectSpec, ParamSpec, Result, SchemaDefinition,
    SourceContext,
    spec::{clean_doc, enum_strings},
};

#[derive(Debug, Deserialize)]
struct LegacyDocument {
    groups: IndexMap<String, Value>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LegacyMethod {
    #[serde(default)]
    path: String,
    #[serde(default)]
    method: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    request_params: Option<Value>,
    #[serde(default)]
    response_params: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct LegacyField {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    ty: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    required: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "enum", default)]
    enum_values: Option<Vec<Value>>,
    #[serde(default)]
    properties: Option<Value>,
    #[serde(default)]
    items: Option<Value>,
}

/// Accept `true`, `"true"`, `"yes"`, `1` and friends.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "required"
        ),
        _ => false,
    })
}

pub(crate) fn load(value: Value, ctx: &SourceContext) -> Result<ApiSpec> {
    let doc: LegacyDocument =
        serde_json::from_value(value).map_err(|e| ctx.invalid_structure(e.to_string()))?;

    let mut schemas = IndexMap::new();
    let mut endpoints = Vec::new();

    for (group, methods) in doc.groups {
        let Value::Array(methods) = methods else {
            warn!(group = %group, "group is not a list of methods, skipping");
            continue;
        };

        for entry in methods {
            let method: LegacyMethod = match serde_json::from_value(entry) {
                Ok(method) => method,
                Err(err) => {
                    warn!(group = %group, %err, "skipping malformed method entry");
                    continue;
                }
            };
            if let Some(endpoint) = endpoint(&group, method, &mut schemas) {
                endpoints.push(endpoint);
            }
        }
    }

    debug!(
        schemas = schemas.len(),
        endpoints = endpoints.len(),
        "loaded legacy document"
    );

    Ok(ApiSpec {
        flavor: Flavor::Legacy,
        title: doc.title,
        version: doc.version,
        description: doc.description,
        schemas,
        endpoints,
    })
}

fn endpoint(
    group: &str,
    method: LegacyMethod,
    schemas: &mut IndexMap<String, SchemaDefinition>,
) -> Option<EndpointSpec> {
    let Some(verb) = HttpMethod::parse(&method.method) else {
        warn!(path = %method.path, method = %method.method, "unknown HTTP method, skipping endpoint");
        return None;
    };

    let mut responses = IndexMap::new();
    if let Some(response_params) = method.response_params.as_ref().filter(|v| is_field_list(v)) {
        let name = response_model_name(&method.path, verb);
        // First definition wins when two endpoints derive the same name.
        schemas
            .entry(name.clone())
            .or_insert_with(|| SchemaDefinition {
                name: name.clone(),
                description: None,
                object: object_spec(fields(response_params)),
                alias: None,
            });
        responses.insert("200".to_string(), Some(FieldSpec::reference(name)));
    }

    let params = method
        .request_params
        .as_ref()
        .map(fields)
        .unwrap_or_default()
        .into_iter()
        .filter(|f| !f.name.is_empty())
        .map(|f| ParamSpec {
            schema: field_spec(&f),
            name: f.name,
            location: None,
            required: f.required,
            description: clean_doc(f.description),
        })
        .collect();

    Some(EndpointSpec {
        path: method.path,
        method: verb,
        group: Some(group.to_string()),
        operation_id: None,
        description: clean_doc(method.description),
        params,
        request_body: None,
        responses,
    })
}

/// `<PascalPath><Verb>Response`; the verb is omitted for GET.
pub fn response_model_name(path: &str, method: HttpMethod) -> String {
    let mut name = to_pascal_case(path);
    if name.is_empty() {
        name.push_str("Root");
    }
    if method != HttpMethod::Get {
        name.push_str(&capitalize(&method.as_str().to_ascii_lowercase()));
    }
    name.push_str("Response");
    name
}

fn is_field_list(value: &Value) -> bool {
    value.is_array() || value.is_object()
}

/// Read a field list written either as an array of named entries or as a
/// map from name to entry.
fn fields(value: &Value) -> Vec<LegacyField> {
    match value {
        Value::Array(entries) => entries
            .iter()
            .filter(|e| e.is_object())
            .filter_map(|e| parse_field(e.clone()))
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter(|(_, e)| e.is_object())
            .filter_map(|(name, e)| {
                let mut field = parse_field(e.clone())?;
                if field.name.is_empty() {
                    field.name = name.clone();
                }
                Some(field)
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_field(value: Value) -> Option<LegacyField> {
    serde_json::from_value(value)
        .inspect_err(|err| warn!(%err, "skipping malformed field entry"))
        .ok()
}

fn object_spec(fields: Vec<LegacyField>) -> ObjectSpec {
    let mut object = ObjectSpec::default();
    for field in fields.into_iter().filter(|f| !f.name.is_empty()) {
        if field.required {
            object.required.insert(field.name.clone());
        }
        let spec = field_spec(&field);
        object.properties.entry(field.name).or_insert(spec);
    }
    object
}

fn field_spec(field: &LegacyField) -> FieldSpec {
    FieldSpec {
        ty: field.ty.as_deref().map(|t| t.trim().to_string()),
        format: field.format.clone(),
        reference: None,
        properties: field
            .properties
            .as_ref()
            .filter(|v| is_field_list(v))
            .map(|v| object_spec(fields(v))),
        items: field.items.as_ref().and_then(item_spec).map(Box::new),
        enum_values: field
            .enum_values
            .as_deref()
            .map(enum_strings)
            .unwrap_or_default(),
        alternatives: Vec::new(),
        description: clean_doc(field.description.clone()),
    }
}

fn item_spec(value: &Value) -> Option<FieldSpec> {
    match value {
        Value::Object(_) => parse_field(value.clone()).map(|f| field_spec(&f)),
        Value::String(ty) => Some(FieldSpec::of_type(ty.trim())),
        _ => None,
    }
}
