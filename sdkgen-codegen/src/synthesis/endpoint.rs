//! Endpoint classification: naming, parameter partition and response typing.

use std::collections::HashSet;

use sdkgen_core::{to_pascal_case, to_snake_case};
use sdkgen_document::{EndpointSpec, FieldSpec, Flavor, ParamIn};
use sdkgen_ir::{
    HttpMethod, Operation, OperationParam, ParamLocation, ResponseType, TypeNode,
};
use tracing::{debug, warn};

use super::session::GenerationSession;
use crate::Diagnostic;

const PHASE: &str = "classify";

/// Parameters with this name (in any case) are credentials handled by the
/// transport and never become formal parameters.
const TOKEN_PARAM: &str = "token";

impl<'s> GenerationSession<'s> {
    /// Turn one endpoint into an operation.
    ///
    /// `name` is the already deduplicated method name, see
    /// [`operation_name`]. Types synthesized for parameters are named
    /// `<Group><Operation><Field>`.
    pub fn classify_endpoint(
        &mut self,
        endpoint: &EndpointSpec,
        group: &str,
        name: String,
    ) -> Operation {
        let at = format!("{} {}", endpoint.method, endpoint.path);
        let flavor = self.spec.flavor;

        let (path, rewritten) = match flavor {
            Flavor::Legacy => rewrite_id_path(&endpoint.path),
            Flavor::OpenApi => (endpoint.path.clone(), false),
        };
        let placeholders = placeholders(&path);
        let parent = format!("{}{}", to_pascal_case(group), to_pascal_case(&name));

        let mut seen = HashSet::new();
        let mut declared = Vec::with_capacity(endpoint.params.len());
        for param in &endpoint.params {
            if param.name.eq_ignore_ascii_case(TOKEN_PARAM) {
                debug!(operation = %name, param = %param.name, "dropped token parameter");
                continue;
            }

            let location = match param.location {
                Some(ParamIn::Path) => ParamLocation::Path,
                Some(ParamIn::Query) => ParamLocation::Query,
                Some(ParamIn::Header | ParamIn::Cookie) => {
                    self.report(
                        Diagnostic::info(
                            PHASE,
                            format!("parameter '{}' is left to the transport", param.name),
                        )
                        .at(&at),
                    );
                    continue;
                }
                None if placeholders.contains(&param.name) => ParamLocation::Path,
                None if endpoint.method.sends_query() => ParamLocation::Query,
                None => ParamLocation::BodyField,
            };

            if !seen.insert(param.name.clone()) {
                warn!(operation = %name, param = %param.name, "duplicate parameter skipped");
                self.report(
                    Diagnostic::warning(PHASE, format!("duplicate parameter '{}'", param.name))
                        .at(&at),
                );
                continue;
            }

            let required = param.required || location == ParamLocation::Path;
            let ty = self.resolve_type(&parent, &param.name, &param.schema);
            declared.push(OperationParam {
                name: param.name.clone(),
                ty: wrap(ty, required),
                required,
                location,
                doc: param.description.clone().filter(|d| !d.trim().is_empty()),
            });
        }

        let mut params = Vec::with_capacity(declared.len() + 1);
        for placeholder in &placeholders {
            if seen.contains(placeholder) {
                continue;
            }
            let (ty, doc) = if rewritten && placeholder == "id" {
                (TypeNode::int(), "Record ID.")
            } else {
                warn!(operation = %name, placeholder = %placeholder, "undeclared path placeholder");
                self.report(
                    Diagnostic::warning(
                        PHASE,
                        format!("path placeholder '{{{placeholder}}}' has no declared parameter"),
                    )
                    .at(&at),
                );
                (TypeNode::string(), "")
            };
            seen.insert(placeholder.clone());
            params.push(OperationParam {
                name: placeholder.clone(),
                ty,
                required: true,
                location: ParamLocation::Path,
                doc: Some(doc.to_string()).filter(|d| !d.is_empty()),
            });
        }
        params.extend(declared);

        if let Some(body) = &endpoint.request_body {
            let name = if seen.contains("body") { "request_body" } else { "body" };
            let ty = self.resolve_type(&parent, "Body", &body.schema);
            params.push(OperationParam {
                name: name.to_string(),
                ty: wrap(ty, body.required),
                required: body.required,
                location: ParamLocation::Body,
                doc: body.description.clone().filter(|d| !d.trim().is_empty()),
            });
        }

        // Stable: each group keeps declaration order.
        params.sort_by_key(|p| !p.required);

        let response = self.response_type(endpoint, &at);
        debug!(
            operation = %name,
            method = %endpoint.method,
            path = %path,
            params = params.len(),
            "classified endpoint"
        );

        Operation {
            name,
            method: endpoint.method,
            path,
            doc: endpoint.description.clone().filter(|d| !d.trim().is_empty()),
            params,
            response,
        }
    }

    /// Lowest 2xx status with a schema, else `default`. Only a reference to
    /// a schema that resolves to a model gives a typed response.
    fn response_type(&mut self, endpoint: &EndpointSpec, at: &str) -> ResponseType {
        let Some(schema) = success_schema(endpoint) else {
            return ResponseType::Passthrough;
        };
        let Some(reference) = &schema.reference else {
            return ResponseType::Passthrough;
        };
        match self.resolve_reference(reference, at) {
            TypeNode::Model(name) => ResponseType::Model(name),
            _ => ResponseType::Passthrough,
        }
    }
}

/// Derive the method name for an endpoint before deduplication.
///
/// An explicit operation id wins. Legacy documents name the operation after
/// the last path segment, schema documents after the whole path.
pub fn operation_name(endpoint: &EndpointSpec, flavor: Flavor) -> String {
    if let Some(id) = endpoint
        .operation_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        let name = to_snake_case(id);
        if !name.is_empty() {
            return name;
        }
    }

    let segments = segments(&endpoint.path);
    let name = match flavor {
        Flavor::Legacy => legacy_name(&segments, endpoint.method),
        Flavor::OpenApi => to_snake_case(&segments.join("_")),
    };
    if name.is_empty() {
        endpoint.method.as_str().to_ascii_lowercase()
    } else {
        name
    }
}

/// `/projects/id` -> `get_projects_id`, `/projects/list` -> `list`.
fn legacy_name(segments: &[&str], method: HttpMethod) -> String {
    let Some((last, rest)) = segments.split_last() else {
        return String::new();
    };
    if *last != "id" {
        return to_snake_case(last);
    }

    let base = match rest.last() {
        Some(parent) => format!("{}_id", to_snake_case(parent)),
        None => "id".to_string(),
    };
    let prefix = match method {
        HttpMethod::Get => "get",
        HttpMethod::Post => "create",
        HttpMethod::Put => "update",
        HttpMethod::Delete => "delete",
        other => return format!("{}_{base}", other.as_str().to_ascii_lowercase()),
    };
    format!("{prefix}_{base}")
}

/// Path segments with placeholder braces stripped.
fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .map(|s| s.trim_start_matches('{').trim_end_matches('}'))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Rewrite a trailing literal `/id` segment into the `{id}` placeholder.
fn rewrite_id_path(path: &str) -> (String, bool) {
    let trimmed = path.trim_end_matches('/');
    match trimmed.strip_suffix("/id") {
        Some(prefix) => (format!("{prefix}/{{id}}"), true),
        None => (path.to_string(), false),
    }
}

/// Placeholder names in a path template, in order of appearance.
pub(crate) fn placeholders(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = after[..end].trim();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        rest = &after[end + 1..];
    }
    names
}

fn success_schema(endpoint: &EndpointSpec) -> Option<&FieldSpec> {
    let lowest = endpoint
        .responses
        .iter()
        .filter_map(|(status, schema)| {
            let code: u16 = status.trim().parse().ok()?;
            ((200..300).contains(&code) && schema.is_some()).then_some((code, schema))
        })
        .min_by_key(|(code, _)| *code)
        .and_then(|(_, schema)| schema.as_ref());

    lowest.or_else(|| endpoint.responses.get("default").and_then(Option::as_ref))
}

fn wrap(ty: TypeNode, required: bool) -> TypeNode {
    if required { ty } else { TypeNode::optional(ty) }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use sdkgen_document::{ApiSpec, ObjectSpec, ParamSpec, RequestBody, SchemaDefinition};

    use super::*;

    fn endpoint(method: HttpMethod, path: &str, params: Vec<ParamSpec>) -> EndpointSpec {
        EndpointSpec {
            path: path.into(),
            method,
            group: Some("projects".into()),
            operation_id: None,
            description: None,
            params,
            request_body: None,
            responses: IndexMap::new(),
        }
    }

    fn param(name: &str, ty: &str, location: Option<ParamIn>, required: bool) -> ParamSpec {
        ParamSpec {
            name: name.into(),
            location,
            required,
            schema: FieldSpec::of_type(ty),
            description: None,
        }
    }

    fn doc(flavor: Flavor, schemas: Vec<SchemaDefinition>) -> ApiSpec {
        ApiSpec {
            flavor,
            title: None,
            version: None,
            description: None,
            schemas: schemas.into_iter().map(|s| (s.name.clone(), s)).collect(),
            endpoints: Vec::new(),
        }
    }

    fn classify(spec: &ApiSpec, endpoint: &EndpointSpec) -> Operation {
        let mut session = GenerationSession::new(spec);
        let name = operation_name(endpoint, spec.flavor);
        session.classify_endpoint(endpoint, "projects", name)
    }

    #[test]
    fn test_legacy_names() {
        let name = |method, path| operation_name(&endpoint(method, path, vec![]), Flavor::Legacy);

        assert_eq!(name(HttpMethod::Get, "/projects/id"), "get_projects_id");
        assert_eq!(name(HttpMethod::Post, "/projects/{id}"), "create_projects_id");
        assert_eq!(name(HttpMethod::Put, "/tasks/id/"), "update_tasks_id");
        assert_eq!(name(HttpMethod::Delete, "/tasks/id"), "delete_tasks_id");
        assert_eq!(name(HttpMethod::Patch, "/tasks/id"), "patch_tasks_id");
        assert_eq!(name(HttpMethod::Get, "/id"), "get_id");
        assert_eq!(name(HttpMethod::Get, "/projects/list"), "list");
        assert_eq!(name(HttpMethod::Get, "/"), "get");
    }

    #[test]
    fn test_schema_names() {
        let mut ep = endpoint(HttpMethod::Get, "/projects/{id}/tasks", vec![]);
        assert_eq!(operation_name(&ep, Flavor::OpenApi), "projects_id_tasks");

        ep.operation_id = Some("listProjectTasks".into());
        assert_eq!(operation_name(&ep, Flavor::OpenApi), "list_project_tasks");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders("/a/{x}/b/{y}/{x}"), vec!["x", "y"]);
        assert!(placeholders("/a/b").is_empty());
        assert!(placeholders("/a/{broken").is_empty());
    }

    #[test]
    fn test_legacy_id_rewrite_injects_param() {
        let spec = doc(Flavor::Legacy, vec![]);
        let ep = endpoint(
            HttpMethod::Get,
            "/projects/id",
            vec![param("Token", "string", None, true)],
        );
        let op = classify(&spec, &ep);

        assert_eq!(op.path, "/projects/{id}");
        assert_eq!(op.params.len(), 1);
        assert_eq!(op.params[0].name, "id");
        assert_eq!(op.params[0].ty, TypeNode::int());
        assert_eq!(op.params[0].location, ParamLocation::Path);
        assert!(op.params[0].required);
    }

    #[test]
    fn test_legacy_id_rewrite_paths() {
        assert_eq!(rewrite_id_path("/x/id"), ("/x/{id}".to_string(), true));
        assert_eq!(rewrite_id_path("/x/id/"), ("/x/{id}".to_string(), true));
        assert_eq!(rewrite_id_path("/id"), ("/{id}".to_string(), true));
        assert_eq!(rewrite_id_path("/x/ids"), ("/x/ids".to_string(), false));
        assert_eq!(rewrite_id_path("/x/list"), ("/x/list".to_string(), false));
    }

    #[test]
    fn test_two_segment_id_path_gets_id_param() {
        let spec = doc(Flavor::Legacy, vec![]);
        let op = classify(&spec, &endpoint(HttpMethod::Delete, "/x/id", vec![]));

        assert_eq!(op.path, "/x/{id}");
        let names: Vec<_> = op.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id"]);
        assert_eq!(op.params[0].ty, TypeNode::int());
    }

    #[test]
    fn test_param_types_are_named_per_group() {
        let spec = doc(Flavor::Legacy, vec![]);
        let status = |values: &[&str]| ParamSpec {
            schema: FieldSpec {
                enum_values: values.iter().map(|v| v.to_string()).collect(),
                ..FieldSpec::of_type("string")
            },
            ..param("status", "string", None, false)
        };
        let projects = endpoint(HttpMethod::Get, "/projects/list", vec![status(&["doing", "done"])]);
        let mut tasks = endpoint(HttpMethod::Get, "/tasks/list", vec![status(&["wait", "closed"])]);
        tasks.group = Some("tasks".into());

        let mut session = GenerationSession::new(&spec);
        let first = session.classify_endpoint(&projects, "projects", "list".into());
        let second = session.classify_endpoint(&tasks, "tasks", "list".into());

        assert_eq!(
            first.params[0].ty,
            TypeNode::optional(TypeNode::enumeration("ProjectsListStatusEnum"))
        );
        assert_eq!(
            second.params[0].ty,
            TypeNode::optional(TypeNode::enumeration("TasksListStatusEnum"))
        );
        let tasks_enum = session
            .models()
            .iter()
            .find(|m| m.name() == "TasksListStatusEnum")
            .and_then(|m| m.as_enum())
            .unwrap();
        assert!(tasks_enum.members.iter().any(|m| m.value == "wait"));
    }

    #[test]
    fn test_legacy_existing_id_is_not_duplicated() {
        let spec = doc(Flavor::Legacy, vec![]);
        let ep = endpoint(
            HttpMethod::Put,
            "/projects/id",
            vec![
                param("name", "string", None, false),
                param("id", "string", None, false),
            ],
        );
        let op = classify(&spec, &ep);

        let names: Vec<_> = op.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(op.params[0].location, ParamLocation::Path);
        assert_eq!(op.params[0].ty, TypeNode::string());
        assert_eq!(op.params[1].location, ParamLocation::BodyField);
    }

    #[test]
    fn test_legacy_partition() {
        let spec = doc(Flavor::Legacy, vec![]);
        let get = endpoint(
            HttpMethod::Get,
            "/projects",
            vec![param("limit", "integer", None, false)],
        );
        let post = endpoint(
            HttpMethod::Post,
            "/projects",
            vec![param("name", "string", None, true)],
        );

        assert_eq!(classify(&spec, &get).params[0].location, ParamLocation::Query);
        assert_eq!(classify(&spec, &post).params[0].location, ParamLocation::BodyField);
    }

    #[test]
    fn test_token_dropped_in_any_case() {
        let spec = doc(Flavor::OpenApi, vec![]);
        let ep = endpoint(
            HttpMethod::Get,
            "/projects",
            vec![
                param("token", "string", Some(ParamIn::Query), true),
                param("TOKEN", "string", Some(ParamIn::Query), true),
                param("Token", "string", Some(ParamIn::Query), false),
            ],
        );
        assert!(classify(&spec, &ep).params.is_empty());
    }

    #[test]
    fn test_schema_path_param_with_token() {
        let spec = doc(Flavor::OpenApi, vec![]);
        let ep = endpoint(
            HttpMethod::Get,
            "/projects/{id}",
            vec![
                param("id", "integer", Some(ParamIn::Path), true),
                param("Token", "string", Some(ParamIn::Query), false),
            ],
        );
        let op = classify(&spec, &ep);

        assert_eq!(op.params.len(), 1);
        assert_eq!(op.params[0].name, "id");
        assert_eq!(op.params[0].location, ParamLocation::Path);
        assert_eq!(op.params[0].ty, TypeNode::int());
    }

    #[test]
    fn test_headers_dropped_and_required_first() {
        let spec = doc(Flavor::OpenApi, vec![]);
        let ep = endpoint(
            HttpMethod::Get,
            "/projects",
            vec![
                param("page", "integer", Some(ParamIn::Query), false),
                param("X-Trace", "string", Some(ParamIn::Header), true),
                param("owner", "string", Some(ParamIn::Query), true),
            ],
        );
        let mut session = GenerationSession::new(&spec);
        let op = session.classify_endpoint(&ep, "projects", "list_projects".into());

        let names: Vec<_> = op.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["owner", "page"]);
        assert_eq!(op.params[1].ty, TypeNode::optional(TypeNode::int()));
        assert_eq!(session.diagnostics().len(), 1);
    }

    #[test]
    fn test_undeclared_placeholder_is_injected() {
        let spec = doc(Flavor::OpenApi, vec![]);
        let ep = endpoint(HttpMethod::Get, "/projects/{slug}", vec![]);
        let mut session = GenerationSession::new(&spec);
        let op = session.classify_endpoint(&ep, "projects", "get_project".into());

        assert_eq!(op.params[0].name, "slug");
        assert_eq!(op.params[0].ty, TypeNode::string());
        assert!(session.diagnostics()[0].severity.is_warning());
    }

    #[test]
    fn test_request_body_and_response() {
        let project = SchemaDefinition {
            name: "Project".into(),
            object: ObjectSpec::default(),
            ..Default::default()
        };
        let spec = doc(Flavor::OpenApi, vec![project]);
        let mut ep = endpoint(HttpMethod::Post, "/projects", vec![]);
        ep.request_body = Some(RequestBody {
            schema: FieldSpec::reference("Project"),
            required: true,
            description: None,
        });
        ep.responses.insert("default".into(), None);
        ep.responses.insert("201".into(), Some(FieldSpec::reference("Project")));
        ep.responses.insert("200".into(), None);

        let op = classify(&spec, &ep);
        assert_eq!(op.body().unwrap().ty, TypeNode::model("Project"));
        assert_eq!(op.response, ResponseType::Model("Project".into()));
    }

    #[test]
    fn test_non_reference_response_is_passthrough() {
        let spec = doc(Flavor::OpenApi, vec![]);
        let mut ep = endpoint(HttpMethod::Get, "/health", vec![]);
        ep.responses.insert("200".into(), Some(FieldSpec::of_type("object")));
        assert_eq!(classify(&spec, &ep).response, ResponseType::Passthrough);

        ep.responses.insert("200".into(), Some(FieldSpec::reference("Missing")));
        assert_eq!(classify(&spec, &ep).response, ResponseType::Passthrough);
    }
}
