//! OpenAPI-style schema/paths documents (3.x, with a few 2.0 spellings).

use indexmap::IndexMap;
use sdkgen_ir::HttpMethod;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    ApiSpec, EndpointSpec, FieldSpec, Flavor, ObjectSpec, ParamIn, ParamSpec, RequestBody, Result,
    SchemaDefinition, SourceContext,
    spec::{clean_doc, enum_strings},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    info: RawInfo,
    components: RawComponents,
    /// Swagger 2.0 schema table.
    definitions: IndexMap<String, RawSchema>,
    paths: IndexMap<String, RawPathItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawInfo {
    title: Option<String>,
    version: Option<Value>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawComponents {
    schemas: IndexMap<String, RawSchema>,
    parameters: IndexMap<String, RawParameter>,
    request_bodies: IndexMap<String, RawRequestBody>,
    responses: IndexMap<String, RawResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSchema {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "type")]
    ty: Option<RawType>,
    format: Option<String>,
    description: Option<String>,
    properties: Option<IndexMap<String, RawSchema>>,
    required: Vec<String>,
    items: Option<Box<RawSchema>>,
    #[serde(rename = "enum")]
    enum_values: Vec<Value>,
    one_of: Vec<RawSchema>,
    any_of: Vec<RawSchema>,
    all_of: Vec<RawSchema>,
}

/// `type: string` or, in 3.1, `type: [string, "null"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawType {
    One(String),
    Many(Vec<String>),
}

impl RawType {
    /// Lowercased type string; several non-null types join into a
    /// slash-delimited composite.
    fn normalized(&self) -> String {
        match self {
            Self::One(ty) => ty.trim().to_ascii_lowercase(),
            Self::Many(types) => types
                .iter()
                .map(|t| t.trim().to_ascii_lowercase())
                .filter(|t| t != "null")
                .collect::<Vec<_>>()
                .join("/"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawParameter {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    name: String,
    #[serde(rename = "in")]
    location: String,
    required: bool,
    description: Option<String>,
    schema: Option<RawSchema>,
    // Swagger 2.0 puts the type on the parameter itself.
    #[serde(rename = "type")]
    ty: Option<RawType>,
    format: Option<String>,
    items: Option<Box<RawSchema>>,
    #[serde(rename = "enum")]
    enum_values: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPathItem {
    parameters: Vec<RawParameter>,
    get: Option<RawOperation>,
    put: Option<RawOperation>,
    post: Option<RawOperation>,
    delete: Option<RawOperation>,
    options: Option<RawOperation>,
    head: Option<RawOperation>,
    patch: Option<RawOperation>,
}

impl RawPathItem {
    fn operations(&self) -> impl Iterator<Item = (HttpMethod, &RawOperation)> {
        [
            (HttpMethod::Get, &self.get),
            (HttpMethod::Put, &self.put),
            (HttpMethod::Post, &self.post),
            (HttpMethod::Delete, &self.delete),
            (HttpMethod::Options, &self.options),
            (HttpMethod::Head, &self.head),
            (HttpMethod::Patch, &self.patch),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawOperation {
    tags: Vec<String>,
    operation_id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    parameters: Vec<RawParameter>,
    request_body: Option<RawRequestBody>,
    responses: IndexMap<String, RawResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawRequestBody {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    description: Option<String>,
    required: bool,
    content: IndexMap<String, RawMediaType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawResponse {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    content: IndexMap<String, RawMediaType>,
    /// Swagger 2.0 response schema.
    schema: Option<RawSchema>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawMediaType {
    schema: Option<RawSchema>,
}

/// Last segment of a JSON pointer such as `#/components/schemas/Project`.
pub fn ref_name(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}

/// Pick the JSON media type, falling back to any `*json*` type, then the
/// first declared one.
fn json_schema(content: &IndexMap<String, RawMediaType>) -> Option<&RawSchema> {
    content
        .get("application/json")
        .or_else(|| {
            content
                .iter()
                .find(|(ty, _)| ty.contains("json"))
                .map(|(_, media)| media)
        })
        .or_else(|| content.values().next())
        .and_then(|media| media.schema.as_ref())
}

pub(crate) fn load(value: Value, ctx: &SourceContext) -> Result<ApiSpec> {
    let doc: RawDocument =
        serde_json::from_value(value).map_err(|e| ctx.invalid_structure(e.to_string()))?;
    let loader = Loader { doc: &doc };

    let schemas: IndexMap<String, SchemaDefinition> = doc
        .components
        .schemas
        .iter()
        .chain(&doc.definitions)
        .map(|(name, raw)| (name.clone(), loader.schema_definition(name, raw)))
        .collect();

    let mut endpoints = Vec::new();
    for (path, item) in &doc.paths {
        for (method, op) in item.operations() {
            endpoints.push(loader.endpoint(path, method, item, op));
        }
    }

    debug!(
        schemas = schemas.len(),
        endpoints = endpoints.len(),
        "loaded OpenAPI document"
    );

    Ok(ApiSpec {
        flavor: Flavor::OpenApi,
        title: doc.info.title.clone(),
        version: doc.info.version.as_ref().map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
        description: clean_doc(doc.info.description.clone()),
        schemas,
        endpoints,
    })
}

struct Loader<'a> {
    doc: &'a RawDocument,
}

impl Loader<'_> {
    fn schema_definition(&self, name: &str, raw: &RawSchema) -> SchemaDefinition {
        let spec = self.field_spec(raw);
        let is_object = spec.properties.is_some()
            || (spec.reference.is_none()
                && spec.enum_values.is_empty()
                && spec.alternatives.is_empty()
                && matches!(spec.ty.as_deref(), None | Some("object")));

        let description = clean_doc(raw.description.clone());
        if is_object {
            SchemaDefinition {
                name: name.to_string(),
                description,
                object: spec.properties.unwrap_or_default(),
                alias: None,
            }
        } else {
            SchemaDefinition {
                name: name.to_string(),
                description,
                object: ObjectSpec::default(),
                alias: Some(spec),
            }
        }
    }

    fn field_spec(&self, raw: &RawSchema) -> FieldSpec {
        let description = clean_doc(raw.description.clone());

        if let Some(pointer) = &raw.reference {
            return FieldSpec {
                description,
                ..FieldSpec::reference(ref_name(pointer))
            };
        }

        if !raw.all_of.is_empty() {
            return self.merge_all_of(raw);
        }

        FieldSpec {
            ty: raw.ty.as_ref().map(RawType::normalized),
            format: raw.format.clone(),
            reference: None,
            properties: raw
                .properties
                .as_ref()
                .map(|props| self.object_spec(props, &raw.required)),
            items: raw.items.as_ref().map(|i| Box::new(self.field_spec(i))),
            enum_values: enum_strings(&raw.enum_values),
            alternatives: raw
                .one_of
                .iter()
                .chain(&raw.any_of)
                .map(|alt| self.field_spec(alt))
                .collect(),
            description,
        }
    }

    fn object_spec(&self, properties: &IndexMap<String, RawSchema>, required: &[String]) -> ObjectSpec {
        ObjectSpec {
            properties: properties
                .iter()
                .map(|(name, raw)| (name.clone(), self.field_spec(raw)))
                .collect(),
            required: required
                .iter()
                .filter(|name| properties.contains_key(name.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// `allOf` with a single member is that member. Otherwise the object
    /// members are merged; referenced members contribute their own
    /// properties, one level deep.
    fn merge_all_of(&self, raw: &RawSchema) -> FieldSpec {
        let description = clean_doc(raw.description.clone());
        if let [only] = raw.all_of.as_slice()
            && raw.properties.is_none()
        {
            let mut spec = self.field_spec(only);
            spec.description = description.or(spec.description);
            return spec;
        }

        let mut merged = ObjectSpec::default();
        let members = raw.all_of.iter().chain(std::iter::once(raw));
        for member in members {
            let target = match &member.reference {
                Some(pointer) => match self.lookup_schema(ref_name(pointer)) {
                    Some(target) => target,
                    None => {
                        warn!(reference = %pointer, "allOf member not found, skipping");
                        continue;
                    }
                },
                None => member,
            };
            if let Some(props) = &target.properties {
                let object = self.object_spec(props, &target.required);
                for (name, spec) in object.properties {
                    merged.properties.entry(name).or_insert(spec);
                }
                merged.required.extend(object.required);
            }
        }

        FieldSpec {
            ty: Some("object".to_string()),
            properties: Some(merged),
            description,
            ..Default::default()
        }
    }

    fn lookup_schema(&self, name: &str) -> Option<&RawSchema> {
        self.doc
            .components
            .schemas
            .get(name)
            .or_else(|| self.doc.definitions.get(name))
    }

    fn resolve_parameter<'p>(&'p self, param: &'p RawParameter) -> Option<&'p RawParameter> {
        match &param.reference {
            None => Some(param),
            Some(pointer) => {
                let found = self.doc.components.parameters.get(ref_name(pointer));
                if found.is_none() {
                    warn!(reference = %pointer, "parameter reference not found, skipping");
                }
                found
            }
        }
    }

    fn endpoint(
        &self,
        path: &str,
        method: HttpMethod,
        item: &RawPathItem,
        op: &RawOperation,
    ) -> EndpointSpec {
        let mut params: Vec<ParamSpec> = Vec::new();
        let mut request_body = op.request_body.as_ref().and_then(|b| self.request_body(b));

        // Operation-level parameters override path-level ones with the same
        // name and location.
        for raw in item.parameters.iter().chain(&op.parameters) {
            let Some(raw) = self.resolve_parameter(raw) else {
                continue;
            };

            if raw.location.eq_ignore_ascii_case("body") {
                if let Some(schema) = &raw.schema {
                    request_body = Some(RequestBody {
                        schema: self.field_spec(schema),
                        required: raw.required,
                        description: clean_doc(raw.description.clone()),
                    });
                }
                continue;
            }

            let Some(location) = ParamIn::parse(&raw.location) else {
                warn!(path, name = %raw.name, location = %raw.location, "unsupported parameter location, skipping");
                continue;
            };

            let param = ParamSpec {
                name: raw.name.clone(),
                location: Some(location),
                required: raw.required || location == ParamIn::Path,
                schema: self.parameter_schema(raw),
                description: clean_doc(raw.description.clone()),
            };

            match params
                .iter_mut()
                .find(|p| p.name == param.name && p.location == param.location)
            {
                Some(existing) => *existing = param,
                None => params.push(param),
            }
        }

        let responses = op
            .responses
            .iter()
            .map(|(status, response)| (status.clone(), self.response_schema(response)))
            .collect();

        let description = match (clean_doc(op.summary.clone()), clean_doc(op.description.clone())) {
            (Some(summary), Some(description)) if summary != description => {
                Some(format!("{summary}\n\n{description}"))
            }
            (summary, description) => summary.or(description),
        };

        EndpointSpec {
            path: path.to_string(),
            method,
            group: op.tags.first().cloned(),
            operation_id: op.operation_id.clone().filter(|id| !id.trim().is_empty()),
            description,
            params,
            request_body,
            responses,
        }
    }

    fn parameter_schema(&self, raw: &RawParameter) -> FieldSpec {
        match &raw.schema {
            Some(schema) => self.field_spec(schema),
            None => FieldSpec {
                ty: raw.ty.as_ref().map(RawType::normalized),
                format: raw.format.clone(),
                items: raw.items.as_ref().map(|i| Box::new(self.field_spec(i))),
                enum_values: enum_strings(&raw.enum_values),
                ..Default::default()
            },
        }
    }

    fn request_body(&self, raw: &RawRequestBody) -> Option<RequestBody> {
        let raw = match &raw.reference {
            Some(pointer) => self.doc.components.request_bodies.get(ref_name(pointer))?,
            None => raw,
        };
        let schema = json_schema(&raw.content)?;
        Some(RequestBody {
            schema: self.field_spec(schema),
            required: raw.required,
            description: clean_doc(raw.description.clone()),
        })
    }

    fn response_schema(&self, raw: &RawResponse) -> Option<FieldSpec> {
        let raw = match &raw.reference {
            Some(pointer) => self.doc.components.responses.get(ref_name(pointer))?,
            None => raw,
        };
        json_schema(&raw.content)
            .or(raw.schema.as_ref())
            .map(|schema| self.field_spec(schema))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn load_value(value: Value) -> ApiSpec {
        let ctx = SourceContext::new(value.to_string(), "openapi.json");
        load(value, &ctx).unwrap()
    }

    #[test]
    fn test_ref_name() {
        assert_eq!(ref_name("#/components/schemas/Project"), "Project");
        assert_eq!(ref_name("Project"), "Project");
    }

    #[test]
    fn test_schemas_keep_order_and_required() {
        let spec = load_value(json!({
            "openapi": "3.0.0",
            "components": {"schemas": {
                "Project": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": {"type": "string"},
                        "budget": {"type": "number"},
                        "owner": {"$ref": "#/components/schemas/User"}
                    }
                },
                "User": {"type": "object", "properties": {"login": {"type": "string"}}}
            }}
        }));

        let names: Vec<_> = spec.schemas.keys().collect();
        assert_eq!(names, vec!["Project", "User"]);

        let project = spec.schema("Project").unwrap();
        let props: Vec<_> = project.object.properties.keys().collect();
        assert_eq!(props, vec!["name", "budget", "owner"]);
        assert!(project.object.is_required("name"));
        assert_eq!(
            project.object.properties["owner"].reference.as_deref(),
            Some("User")
        );
    }

    #[test]
    fn test_top_level_enum_is_alias() {
        let spec = load_value(json!({
            "openapi": "3.0.0",
            "components": {"schemas": {
                "Status": {"type": "string", "enum": ["open", "closed"]}
            }}
        }));

        let status = spec.schema("Status").unwrap();
        assert_eq!(status.alias.as_ref().unwrap().enum_values, vec!["open", "closed"]);
    }

    #[test]
    fn test_endpoint_parameters() {
        let spec = load_value(json!({
            "openapi": "3.0.0",
            "components": {"parameters": {
                "Limit": {"name": "limit", "in": "query", "schema": {"type": "integer"}}
            }},
            "paths": {"/projects/{id}": {
                "parameters": [{"name": "id", "in": "path", "schema": {"type": "integer"}}],
                "get": {
                    "tags": ["projects"],
                    "summary": "Get project",
                    "parameters": [
                        {"$ref": "#/components/parameters/Limit"},
                        {"name": "X-Trace", "in": "header", "schema": {"type": "string"}}
                    ],
                    "responses": {"200": {"content": {"application/json": {
                        "schema": {"$ref": "#/components/schemas/Project"}
                    }}}}
                }
            }}
        }));

        let endpoint = &spec.endpoints[0];
        assert_eq!(endpoint.group.as_deref(), Some("projects"));
        assert_eq!(endpoint.description.as_deref(), Some("Get project"));

        let params: Vec<_> = endpoint
            .params
            .iter()
            .map(|p| (p.name.as_str(), p.location, p.required))
            .collect();
        assert_eq!(
            params,
            vec![
                ("id", Some(ParamIn::Path), true),
                ("limit", Some(ParamIn::Query), false),
                ("X-Trace", Some(ParamIn::Header), false),
            ]
        );
        assert_eq!(
            endpoint.responses["200"].as_ref().unwrap().reference.as_deref(),
            Some("Project")
        );
    }

    #[test]
    fn test_request_body_and_nullable_type() {
        let spec = load_value(json!({
            "openapi": "3.1.0",
            "paths": {"/tasks": {"post": {
                "requestBody": {"required": true, "content": {"application/json": {"schema": {
                    "type": "object",
                    "properties": {"note": {"type": ["string", "null"]}}
                }}}},
                "responses": {"204": {"description": "created"}}
            }}}
        }));

        let endpoint = &spec.endpoints[0];
        assert!(endpoint.group.is_none());
        let body = endpoint.request_body.as_ref().unwrap();
        assert!(body.required);
        let note = &body.schema.properties.as_ref().unwrap().properties["note"];
        assert_eq!(note.type_name(), "string");
        assert_eq!(endpoint.responses["204"], None);
    }

    #[test]
    fn test_all_of_merges_referenced_properties() {
        let spec = load_value(json!({
            "openapi": "3.0.0",
            "components": {"schemas": {
                "Base": {"type": "object", "required": ["id"], "properties": {"id": {"type": "integer"}}},
                "Task": {"allOf": [
                    {"$ref": "#/components/schemas/Base"},
                    {"type": "object", "properties": {"title": {"type": "string"}}}
                ]}
            }}
        }));

        let task = spec.schema("Task").unwrap();
        let props: Vec<_> = task.object.properties.keys().collect();
        assert_eq!(props, vec!["id", "title"]);
        assert!(task.object.is_required("id"));
    }
}
