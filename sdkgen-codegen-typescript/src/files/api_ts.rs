use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use sdkgen_codegen::{TypeMapper, UniqueNames};
use sdkgen_core::{FileRules, GeneratedFile};
use sdkgen_ir::{ApiClass, Operation, ParamLocation, ResponseType, TypeNode};

use super::{GENERATED_HEADER, ModelKind, ModelModules, join_doc, referenced_types};
use crate::{
    Class, CodeFile, Import, Method, Param, TypeScriptTypeMapper,
    naming::{TS_NAMING, property_key, string_literal},
};

/// Members every API class inherits from `BaseApi`.
const INHERITED: &[&str] = &["constructor", "request", "requestModel", "transport"];

/// One api/<name>.ts file holding an API class.
pub struct ApiTs<'a> {
    api: &'a ApiClass,
    stem: String,
    model_imports: BTreeSet<String>,
}

impl<'a> ApiTs<'a> {
    pub fn new(api: &'a ApiClass, stem: impl Into<String>, modules: &ModelModules) -> Self {
        let mapper = TypeScriptTypeMapper;
        let mut model_imports = BTreeSet::new();
        for op in &api.operations {
            if let Some(name) = op.response.model_name() {
                model_imports.insert(mapper.map_named(name));
            }
            let mut refs = BTreeSet::new();
            for param in &op.params {
                referenced_types(&param.ty, &mut refs);
            }
            for name in refs {
                match modules.get(&name) {
                    Some((_, ModelKind::Struct)) => {
                        model_imports.insert(format!("type {}", mapper.fields_name(&name)));
                    }
                    Some((_, ModelKind::Enum)) => {
                        model_imports.insert(format!("type {}", mapper.map_named(&name)));
                    }
                    None => {}
                }
            }
        }

        Self {
            api,
            stem: stem.into(),
            model_imports,
        }
    }

    fn type_name(&self) -> String {
        TS_NAMING.type_name(&self.api.name)
    }

    fn base_import(&self) -> Import {
        let ops = &self.api.operations;
        let mut import = Import::new("./base.ts").named("BaseApi");
        if ops.iter().any(|op| op.body().is_some()) {
            import = import.named("bodyOf");
        }
        if ops.iter().any(|op| op.response.model_name().is_some()) {
            import = import.named_type("Response");
        }
        import
    }

    fn models_import(&self) -> Import {
        self.model_imports
            .iter()
            .fold(Import::new("../models/index.ts"), |i, name| i.named(name))
    }

    fn operation(op: &Operation, method_names: &mut UniqueNames) -> Method {
        let mapper = TypeScriptTypeMapper;
        let name = method_names.claim(&TS_NAMING.method_name(&op.name));
        let mut method = Method::new(name).async_();

        let mut names = UniqueNames::default();
        let mut tags = Vec::new();
        let mut path = Vec::new();
        let mut query = Vec::new();
        let mut body = Vec::new();
        for (i, param) in op.params.iter().enumerate() {
            let ident = names.claim(&TS_NAMING.field_name(&param.name));

            // Only a trailing run of optional parameters may be omitted.
            let omittable = op.params[i..].iter().all(|p| !p.required);
            let ty = if param.required {
                mapper.render_type(&param.ty)
            } else {
                mapper.render_type(&TypeNode::optional(param.ty.clone()))
            };
            let mut p = Param::new(&ident, ty);
            if omittable {
                p = p.optional();
            }
            method = method.param(p);

            tags.push(match param.doc.as_deref().map(str::trim) {
                Some(doc) if !doc.is_empty() => format!("@param {} - {}", ident, doc),
                _ => format!("@param {}", ident),
            });

            let key = property_key(&param.name);
            let entry = if key == ident {
                ident.clone()
            } else {
                format!("{}: {}", key, ident)
            };
            match param.location {
                ParamLocation::Path => path.push(entry),
                ParamLocation::Query => query.push(entry),
                ParamLocation::BodyField => body.push(entry),
                ParamLocation::Body => body.insert(
                    0,
                    format!("...bodyOf({}, {})", string_literal(&param.name), ident),
                ),
            }
        }

        let tags = (!tags.is_empty()).then(|| tags.join("\n"));
        if let Some(doc) = join_doc([op.doc.as_deref(), tags.as_deref()]) {
            method = method.doc(doc);
        }

        let mut args = vec![
            string_literal(op.method.as_str()),
            string_literal(&op.path),
        ];
        let mut containers: Vec<String> = [path, query, body].into_iter().map(container).collect();
        while containers.last().is_some_and(|c| c == "{}") {
            containers.pop();
        }
        args.extend(containers);

        match &op.response {
            ResponseType::Model(name) => {
                let model = mapper.map_named(name);
                method
                    .returns(format!("Promise<Response<{}>>", model))
                    .body_line(format!(
                        "return this.requestModel({}.fromMap, {});",
                        model,
                        args.join(", ")
                    ))
            }
            ResponseType::Passthrough => method
                .returns("Promise<unknown>")
                .body_line(format!("return this.request({});", args.join(", "))),
        }
    }

    fn class(&self) -> Class {
        let mut method_names = UniqueNames::default();
        for name in INHERITED {
            method_names.claim(name);
        }

        let mut class = Class::new(self.type_name())
            .extends("BaseApi")
            .doc(format!("Operations of the `{}` group.", self.api.group));
        for op in &self.api.operations {
            class = class.method(Self::operation(op, &mut method_names));
        }
        class
    }
}

/// An object literal of container entries.
fn container(entries: Vec<String>) -> String {
    if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", entries.join(", "))
    }
}

impl GeneratedFile for ApiTs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src")
            .join("api")
            .join(format!("{}.ts", self.stem))
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        CodeFile::new()
            .import(self.base_import())
            .import(self.models_import())
            .add(self.class())
            .render()
    }
}
