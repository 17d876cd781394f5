use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use sdkgen_codegen::{TypeMapper, UniqueNames};
use sdkgen_core::{FileRules, GeneratedFile};
use sdkgen_ir::{ApiClass, Operation, ParamLocation, ResponseType};

use super::{GENERATED_HEADER, join_doc, referenced_types};
use crate::{
    Field, Fn, Impl, Param, RustFile, RustTypeMapper, Struct, Use,
    naming::{RUST_NAMING, claim_ident, field_ident, string_literal},
};

const MAX_ARGS: usize = 7;

/// One api/<name>.rs file holding an API class.
pub struct ApiRs<'a> {
    api: &'a ApiClass,
    stem: String,
}

impl<'a> ApiRs<'a> {
    pub fn new(api: &'a ApiClass, stem: impl Into<String>) -> Self {
        Self {
            api,
            stem: stem.into(),
        }
    }

    fn type_name(&self) -> String {
        RUST_NAMING.type_name(&self.api.name)
    }

    fn uses_models(&self) -> bool {
        let mut names = BTreeSet::new();
        for op in &self.api.operations {
            for param in &op.params {
                referenced_types(&param.ty, &mut names);
            }
        }
        !names.is_empty()
            || self
                .api
                .operations
                .iter()
                .any(|op| op.response.model_name().is_some())
    }

    fn imports(&self) -> Vec<Use> {
        let has_models = self
            .api
            .operations
            .iter()
            .any(|op| op.response.model_name().is_some());

        let mut api = Use::new("super").symbol("ApiError");
        if has_models {
            api = api.symbol("Response");
        }
        let mut uses = vec![api.symbol("base::BaseApi")];
        if self.uses_models() {
            uses.push(Use::new("crate::models"));
        }
        uses.push(Use::new("crate::transport").symbols(["Request", "Transport"]));
        uses
    }

    fn definition(&self) -> Struct {
        Struct::new(self.type_name())
            .generics("T")
            .doc(format!(
                "Operations of the `{}` group.",
                self.api.group.replace('`', "'")
            ))
            .derive("Debug")
            .derive("Clone")
            .field(Field::new("base", "BaseApi<T>").private())
    }

    fn operation(op: &Operation, method_names: &mut UniqueNames) -> Fn {
        let mapper = RustTypeMapper::qualified("models");
        let method = claim_ident(
            method_names,
            &RUST_NAMING.safe_name(&RUST_NAMING.method_name(&op.name)),
        );

        let mut f = Fn::new(method).async_().param(Param::receiver("&self"));
        if op.params.len() + 1 > MAX_ARGS {
            f = f.attr("allow(clippy::too_many_arguments)");
        }

        let mut names = UniqueNames::default();
        let mut arguments = Vec::new();
        let mut chain = Vec::new();
        for param in &op.params {
            let ident = claim_ident(&mut names, &field_ident(&param.name));
            f = f.param(Param::new(&ident, mapper.render_type(&param.ty)));

            arguments.push(match param.doc.as_deref().map(str::trim) {
                Some(doc) if !doc.is_empty() => format!("* `{}` - {}", ident, doc),
                _ => format!("* `{}`", ident),
            });

            let setter = match param.location {
                ParamLocation::Path => "path_param",
                ParamLocation::Query => "query_param",
                ParamLocation::BodyField => "body_field",
                ParamLocation::Body => "body",
            };
            chain.push(format!(
                "    .{}({}, &{})?",
                setter,
                string_literal(&param.name),
                ident
            ));
        }

        let arguments = (!arguments.is_empty())
            .then(|| format!("# Arguments\n\n{}", arguments.join("\n")));
        if let Some(doc) = join_doc([op.doc.as_deref(), arguments.as_deref()]) {
            f = f.doc(doc);
        }

        let mut request = format!(
            "let request = Request::new({}, {})",
            string_literal(op.method.as_str()),
            string_literal(&op.path)
        );
        for link in chain {
            request.push('\n');
            request.push_str(&link);
        }
        request.push(';');
        f = f.body(request);

        match &op.response {
            ResponseType::Model(name) => f
                .returns(format!(
                    "Result<Response<{}>, ApiError>",
                    mapper.map_named(name)
                ))
                .body_line("self.base.dispatch_model(request).await"),
            ResponseType::Passthrough => f
                .returns("Result<serde_json::Value, ApiError>")
                .body_line("self.base.dispatch(request).await"),
        }
    }

    fn methods(&self) -> Impl {
        let mut method_names = UniqueNames::default();
        method_names.claim("new");

        let mut block = Impl::new(format!("{}<T>", self.type_name()))
            .generics("T: Transport")
            .method(
                Fn::new("new")
                    .param(Param::new("transport", "T"))
                    .returns("Self")
                    .body("Self {\n    base: BaseApi::new(transport),\n}"),
            );
        for op in &self.api.operations {
            block = block.method(Self::operation(op, &mut method_names));
        }
        block
    }
}

impl GeneratedFile for ApiRs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src")
            .join("api")
            .join(format!("{}.rs", self.stem))
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        RustFile::new()
            .use_group(self.imports())
            .add(self.definition())
            .add(self.methods())
            .render()
    }
}

#[cfg(test)]
mod tests {
    use sdkgen_ir::{HttpMethod, OperationParam, TypeNode};

    use super::*;

    fn param(name: &str, ty: TypeNode, location: ParamLocation, doc: Option<&str>) -> OperationParam {
        OperationParam {
            name: name.to_string(),
            required: !ty.is_optional(),
            ty,
            location,
            doc: doc.map(str::to_string),
        }
    }

    fn api() -> ApiClass {
        ApiClass {
            group: "projects".to_string(),
            name: "ProjectsApi".to_string(),
            operations: vec![
                Operation {
                    name: "get_projects_id".to_string(),
                    method: HttpMethod::Get,
                    path: "/projects/{id}".to_string(),
                    doc: Some("Get one project".to_string()),
                    params: vec![param("id", TypeNode::int(), ParamLocation::Path, Some("Record ID."))],
                    response: ResponseType::Model("ProjectsIdResponse".to_string()),
                },
                Operation {
                    name: "new".to_string(),
                    method: HttpMethod::Post,
                    path: "/projects".to_string(),
                    doc: None,
                    params: vec![
                        param("name", TypeNode::string(), ParamLocation::BodyField, None),
                        param(
                            "begin",
                            TypeNode::optional(TypeNode::model("Day")),
                            ParamLocation::BodyField,
                            None,
                        ),
                    ],
                    response: ResponseType::Passthrough,
                },
            ],
        }
    }

    #[test]
    fn test_api_imports() {
        let content = ApiRs::new(&api(), "projects_api").render();
        assert!(content.starts_with(
            "use super::{ApiError, Response, base::BaseApi};\nuse crate::models;\nuse crate::transport::{Request, Transport};\n"
        ));
        assert!(content.contains("pub struct ProjectsApi<T> {\n    base: BaseApi<T>,\n}"));
        assert!(content.contains("impl<T: Transport> ProjectsApi<T> {"));
    }

    #[test]
    fn test_model_operation() {
        let content = ApiRs::new(&api(), "projects_api").render();
        assert!(content.contains(
            "    /// Get one project\n    ///\n    /// # Arguments\n    ///\n    /// * `id` - Record ID.\n"
        ));
        assert!(content.contains(
            "    pub async fn get_projects_id(&self, id: i64) -> Result<Response<models::ProjectsIdResponse>, ApiError> {\n        let request = Request::new(\"GET\", \"/projects/{id}\")\n            .path_param(\"id\", &id)?;\n        self.base.dispatch_model(request).await\n"
        ));
    }

    #[test]
    fn test_passthrough_operation_avoids_constructor_name() {
        let content = ApiRs::new(&api(), "projects_api").render();
        assert!(content.contains(
            "pub async fn new_2(&self, name: String, begin: Option<models::Day>) -> Result<serde_json::Value, ApiError> {"
        ));
        assert!(content.contains("            .body_field(\"begin\", &begin)?;\n"));
        assert!(content.contains("self.base.dispatch(request).await"));
    }
}
