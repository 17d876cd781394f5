use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use sdkgen_codegen::TypeMapper;
use sdkgen_core::{FileRules, GeneratedFile};
use sdkgen_ir::{StructModel, TypeNode};

use super::{GENERATED_HEADER, ModelKind, ModelModules, referenced_types};
use crate::{
    Class, ClassField, CodeFile, Import, Interface, InterfaceField, Method, Param,
    TypeScriptTypeMapper,
    naming::{TS_NAMING, property_access, property_key, string_literal},
};

/// One models/<name>.ts file: a `<Name>Fields` interface describing the
/// plain data, and a `<Name>` class built from it.
pub struct ModelTs<'a> {
    model: &'a StructModel,
    stem: String,
    imports: Vec<Import>,
}

impl<'a> ModelTs<'a> {
    pub fn new(model: &'a StructModel, stem: impl Into<String>, modules: &ModelModules) -> Self {
        let mut refs = BTreeSet::new();
        for field in &model.fields {
            referenced_types(&field.ty, &mut refs);
        }

        let mapper = TypeScriptTypeMapper;
        let mut imports = vec![Import::new("./base.ts").named("Model")];
        for name in refs.iter().filter(|name| **name != model.name) {
            let Some((stem, kind)) = modules.get(name) else {
                continue;
            };
            let symbol = match kind {
                ModelKind::Struct => mapper.fields_name(name),
                ModelKind::Enum => mapper.map_named(name),
            };
            imports.push(
                Import::new(format!("./{}.ts", stem))
                    .named(symbol)
                    .type_only(),
            );
        }

        Self {
            model,
            stem: stem.into(),
            imports,
        }
    }

    fn type_name(&self) -> String {
        TS_NAMING.type_name(&self.model.name)
    }

    fn fields_name(&self) -> String {
        TypeScriptTypeMapper.fields_name(&self.model.name)
    }

    /// Field type; optional fields are always nullable.
    fn field_type(required: bool, ty: &TypeNode) -> String {
        let mapper = TypeScriptTypeMapper;
        if required {
            mapper.render_type(ty)
        } else {
            mapper.render_type(&TypeNode::optional(ty.clone()))
        }
    }

    fn interface(&self) -> Interface {
        let mut iface = Interface::new(self.fields_name())
            .doc(format!("Fields of {{@link {}}}.", self.type_name()));
        for field in &self.model.fields {
            let mut f = InterfaceField::new(
                property_key(&field.name),
                Self::field_type(field.required, &field.ty),
            );
            if !field.required {
                f = f.optional();
            }
            if let Some(doc) = &field.doc {
                f = f.doc(doc);
            }
            iface = iface.field(f);
        }
        iface
    }

    fn class(&self) -> Class {
        let type_name = self.type_name();
        let fields_name = self.fields_name();
        let required: Vec<String> = self
            .model
            .required_fields()
            .map(|f| string_literal(&f.name))
            .collect();

        let mut class = Class::new(&type_name)
            .extends("Model")
            .implements(&fields_name)
            .static_member(format!(
                "static readonly NAME = {};",
                string_literal(&self.model.name)
            ))
            .static_member(format!(
                "static readonly REQUIRED: readonly string[] = [{}];",
                required.join(", ")
            ));
        if let Some(doc) = &self.model.doc {
            class = class.doc(doc);
        }

        // An unused parameter fails `noUnusedParameters`.
        let param = if self.model.fields.is_empty() { "_fields" } else { "fields" };
        let mut constructor = Method::constructor()
            .param(Param::new(param, &fields_name))
            .body_line("super();");
        for field in &self.model.fields {
            let mut f = ClassField::new(
                property_key(&field.name),
                Self::field_type(field.required, &field.ty),
            );
            if let Some(doc) = &field.doc {
                f = f.doc(doc);
            }
            class = class.field(f);

            let source = property_access("fields", &field.name);
            let value = if field.required {
                source
            } else {
                format!("{} ?? null", source)
            };
            constructor = constructor.body_line(format!(
                "{} = {};",
                property_access("this", &field.name),
                value
            ));
        }

        let from_map = Method::new("fromMap")
            .static_()
            .doc("Build from a response map. Throws a `ModelError` when a required field is missing.")
            .param(Param::new("map", "Record<string, unknown>"))
            .returns(&type_name)
            .body_line(format!(
                "Model.assertRequired({0}.NAME, map, {0}.REQUIRED);",
                type_name
            ))
            .body_line(format!(
                "return new {}(map as unknown as {});",
                type_name, fields_name
            ));

        class.method(constructor).method(from_map)
    }
}

impl GeneratedFile for ModelTs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src")
            .join("models")
            .join(format!("{}.ts", self.stem))
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        self.imports
            .iter()
            .cloned()
            .fold(CodeFile::new(), CodeFile::import)
            .add(self.interface())
            .add(self.class())
            .render()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use sdkgen_ir::ModelField;

    use super::*;

    fn project() -> StructModel {
        StructModel {
            name: "Project".to_string(),
            doc: Some("A project".to_string()),
            fields: vec![
                ModelField::new("name", TypeNode::string(), true).doc(Some("Project name".into())),
                ModelField::new("user-id", TypeNode::int(), true),
                ModelField::new("budget", TypeNode::optional(TypeNode::float()), false),
                ModelField::new(
                    "status",
                    TypeNode::optional(TypeNode::enumeration("StatusEnum")),
                    false,
                ),
                ModelField::new(
                    "lead",
                    TypeNode::optional(TypeNode::model("User")),
                    false,
                ),
                ModelField::new(
                    "parent",
                    TypeNode::optional(TypeNode::model("Project")),
                    false,
                ),
            ],
            dependencies: BTreeSet::from(["StatusEnum".to_string(), "User".to_string()]),
        }
    }

    fn modules() -> ModelModules {
        let mut modules = ModelModules::default();
        modules.insert("Project", "project", ModelKind::Struct);
        modules.insert("User", "user", ModelKind::Struct);
        modules.insert("StatusEnum", "status-enum", ModelKind::Enum);
        modules
    }

    #[test]
    fn test_model_imports() {
        let model = project();
        let content = ModelTs::new(&model, "project", &modules()).render();
        assert!(content.starts_with(
            "import { Model } from \"./base.ts\";\n\
             import type { StatusEnum } from \"./status-enum.ts\";\n\
             import type { UserFields } from \"./user.ts\";\n\n"
        ));
        assert!(!content.contains("from \"./project.ts\""));
    }

    #[test]
    fn test_model_interface() {
        let model = project();
        let content = ModelTs::new(&model, "project", &modules()).render();
        assert!(content.contains(
            "/** Fields of {@link Project}. */\n\
             export interface ProjectFields {\n  \
             /** Project name */\n  \
             name: string;\n  \
             \"user-id\": number;\n  \
             budget?: number | null;\n  \
             status?: StatusEnum | null;\n  \
             lead?: UserFields | null;\n  \
             parent?: ProjectFields | null;\n\
             }\n"
        ));
    }

    #[test]
    fn test_model_class() {
        let model = project();
        let content = ModelTs::new(&model, "project", &modules()).render();
        assert!(content.contains("/** A project */\nexport class Project extends Model implements ProjectFields {\n"));
        assert!(content.contains("  static readonly NAME = \"Project\";\n"));
        assert!(content.contains("  static readonly REQUIRED: readonly string[] = [\"name\", \"user-id\"];\n"));
        assert!(content.contains("  \"user-id\": number;\n"));
        assert!(content.contains("  budget: number | null;\n"));
        assert!(content.contains("    this.name = fields.name;\n"));
        assert!(content.contains("    this[\"user-id\"] = fields[\"user-id\"];\n"));
        assert!(content.contains("    this.budget = fields.budget ?? null;\n"));
        assert!(content.contains("  static fromMap(map: Record<string, unknown>): Project {\n"));
        assert!(content.contains("    Model.assertRequired(Project.NAME, map, Project.REQUIRED);\n"));
        assert!(content.contains("    return new Project(map as unknown as ProjectFields);\n"));
    }

    #[test]
    fn test_empty_model() {
        let model = StructModel {
            name: "Empty".to_string(),
            doc: None,
            fields: Vec::new(),
            dependencies: BTreeSet::new(),
        };
        let content = ModelTs::new(&model, "empty", &ModelModules::default()).render();
        assert!(content.contains("export interface EmptyFields {}\n"));
        assert!(content.contains("  constructor(_fields: EmptyFields) {\n    super();\n  }\n"));
        assert!(content.contains("  static readonly REQUIRED: readonly string[] = [];\n"));
    }

    #[test]
    fn test_model_path() {
        let model = project();
        let file = ModelTs::new(&model, "project", &modules());
        assert_eq!(
            file.path(Path::new("sdk")),
            PathBuf::from("sdk/src/models/project.ts")
        );
    }
}
