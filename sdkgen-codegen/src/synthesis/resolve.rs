//! Field specification to [`TypeNode`] resolution.

use sdkgen_core::to_pascal_case;
use sdkgen_document::FieldSpec;
use sdkgen_ir::{Primitive, TypeNode};
use tracing::warn;

use super::session::{GenerationSession, SymbolKind};
use crate::Diagnostic;

const PHASE: &str = "resolve";

impl<'s> GenerationSession<'s> {
    /// Resolve one field of `parent` into a type expression.
    ///
    /// Nested objects, enums and referenced schemas are synthesized and
    /// registered on the way, so the result only ever names registered
    /// symbols (or inline unions). Rules are tried in order: reference,
    /// inline object, array, enum, alternatives, slash union, primitive.
    pub fn resolve_type(&mut self, parent: &str, field: &str, spec: &FieldSpec) -> TypeNode {
        if let Some(reference) = &spec.reference {
            return self.resolve_reference(reference, &location(parent, field));
        }

        let declared = spec.type_name().trim();
        let lowered = declared.to_ascii_lowercase();

        if let Some(object) = &spec.properties
            && (lowered.is_empty() || lowered == "object")
        {
            let name = self.registry.unique_name(&nested_name(parent, field, ""));
            return self.synthesize_model(&name, spec.description.clone(), object);
        }

        if lowered == "array" || (lowered.is_empty() && spec.items.is_some()) {
            return TypeNode::list(self.resolve_items(parent, field, spec.items.as_deref()));
        }

        if !spec.enum_values.is_empty() {
            let name = self.registry.unique_name(&nested_name(parent, field, "Enum"));
            return self.synthesize_enum(&name, spec.description.clone(), spec);
        }

        if !spec.alternatives.is_empty() {
            let members = spec
                .alternatives
                .iter()
                .enumerate()
                .map(|(i, alt)| self.resolve_type(parent, &format!("{field}Variant{}", i + 1), alt))
                .collect();
            return self.union_of(parent, field, members);
        }

        if declared.contains('/') {
            let at = location(parent, field);
            let members = declared
                .split('/')
                .map(|token| self.map_token(token.trim(), spec.format.as_deref(), &at))
                .collect();
            return self.union_of(parent, field, members);
        }

        self.map_token(declared, spec.format.as_deref(), &location(parent, field))
    }

    /// Resolve a reference to a named schema, synthesizing it on first use.
    pub fn resolve_reference(&mut self, name: &str, at: &str) -> TypeNode {
        if let Some(ty) = self.symbol_type(name) {
            return ty;
        }
        if let Some(ty) = self.aliases.get(name) {
            return ty.clone();
        }

        let Some(def) = self.registry.definition(name) else {
            warn!(reference = name, at, "unresolved reference, falling back to untyped");
            self.report(
                Diagnostic::warning(PHASE, format!("unresolved reference '{name}'")).at(at),
            );
            return TypeNode::Any;
        };

        match &def.alias {
            None => self.synthesize_model(name, def.description.clone(), &def.object),
            Some(alias) if !alias.enum_values.is_empty() => {
                self.synthesize_enum(name, def.description.clone(), alias)
            }
            Some(alias) => {
                if !self.alias_stack.insert(name.to_string()) {
                    self.report(
                        Diagnostic::warning(PHASE, format!("schema '{name}' refers to itself"))
                            .at(at),
                    );
                    return TypeNode::Any;
                }
                let ty = self.resolve_type(name, "", alias);
                self.alias_stack.shift_remove(name);
                self.aliases.insert(name.to_string(), ty.clone());
                ty
            }
        }
    }

    /// The type of an already registered model or enum. Union names are
    /// registered only to keep them unique and resolve to nothing here.
    pub(crate) fn symbol_type(&self, name: &str) -> Option<TypeNode> {
        match self.registry.kind(name)? {
            SymbolKind::Struct => Some(TypeNode::model(name)),
            SymbolKind::Enum => Some(TypeNode::enumeration(name)),
            SymbolKind::Union => None,
        }
    }

    /// Build a union, collapsing duplicate members. One member is returned
    /// as itself, none degrades to untyped. A real union claims a name no
    /// other symbol of the run uses.
    fn union_of(&mut self, parent: &str, field: &str, members: Vec<TypeNode>) -> TypeNode {
        let mut distinct: Vec<TypeNode> = Vec::with_capacity(members.len());
        for member in members {
            if !distinct.contains(&member) {
                distinct.push(member);
            }
        }
        match distinct.len() {
            0 => TypeNode::Any,
            1 => distinct.remove(0),
            _ => {
                let name = self.registry.unique_name(&nested_name(parent, field, "Union"));
                self.registry.register(&name, SymbolKind::Union);
                TypeNode::union(name, distinct)
            }
        }
    }

    fn resolve_items(&mut self, parent: &str, field: &str, items: Option<&FieldSpec>) -> TypeNode {
        // Missing or kindless items stay untyped rather than defaulting to string.
        let Some(items) = items.filter(|items| has_kind(items)) else {
            return TypeNode::Any;
        };
        // Item names extend the field name, so `tags` items become `<Parent>TagsItem`.
        self.resolve_type(parent, &format!("{field}Item"), items)
    }

    /// Map one type token through the primitive table.
    fn map_token(&mut self, token: &str, format: Option<&str>, at: &str) -> TypeNode {
        match token.to_ascii_lowercase().as_str() {
            "" => TypeNode::string(),
            "string" | "str" | "text" => match format.map(str::to_ascii_lowercase).as_deref() {
                Some("date-time") => TypeNode::primitive(Primitive::DateTime),
                Some("date") => TypeNode::primitive(Primitive::Date),
                _ => TypeNode::string(),
            },
            "integer" | "int" | "long" => TypeNode::int(),
            "boolean" | "bool" => TypeNode::bool(),
            "number" | "float" | "double" | "decimal" => TypeNode::float(),
            "datetime" | "date-time" => TypeNode::primitive(Primitive::DateTime),
            "date" => TypeNode::primitive(Primitive::Date),
            "array" | "list" => TypeNode::list(TypeNode::Any),
            "object" | "map" | "dict" | "any" | "mixed" | "null" => TypeNode::Any,
            _ => match self.schema_named(token) {
                Some(name) => self.resolve_reference(&name, at),
                None => {
                    warn!(token, at, "unknown type, falling back to untyped");
                    self.report(Diagnostic::info(PHASE, format!("unknown type '{token}'")).at(at));
                    TypeNode::Any
                }
            },
        }
    }

    /// Find a schema whose name matches `token`, exactly or ignoring case.
    fn schema_named(&self, token: &str) -> Option<String> {
        let schemas = &self.spec.schemas;
        if schemas.contains_key(token) {
            return Some(token.to_string());
        }
        schemas
            .keys()
            .find(|name| name.eq_ignore_ascii_case(token))
            .cloned()
    }
}

/// `<Parent><Field><suffix>` with the field PascalCased.
pub(crate) fn nested_name(parent: &str, field: &str, suffix: &str) -> String {
    format!("{parent}{}{suffix}", to_pascal_case(field))
}

fn has_kind(spec: &FieldSpec) -> bool {
    spec.reference.is_some()
        || spec.properties.is_some()
        || spec.items.is_some()
        || !spec.enum_values.is_empty()
        || !spec.alternatives.is_empty()
        || !spec.type_name().trim().is_empty()
}

fn location(parent: &str, field: &str) -> String {
    if field.is_empty() {
        parent.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

#[cfg(test)]
mod tests {
    use sdkgen_document::{ApiSpec, Flavor, ObjectSpec, SchemaDefinition};

    use super::*;

    fn spec(schemas: Vec<SchemaDefinition>) -> ApiSpec {
        ApiSpec {
            flavor: Flavor::OpenApi,
            title: None,
            version: None,
            description: None,
            schemas: schemas.into_iter().map(|s| (s.name.clone(), s)).collect(),
            endpoints: Vec::new(),
        }
    }

    fn object(name: &str, props: Vec<(&str, FieldSpec)>) -> SchemaDefinition {
        SchemaDefinition {
            name: name.into(),
            object: ObjectSpec {
                properties: props.into_iter().map(|(n, f)| (n.to_string(), f)).collect(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_primitive_table() {
        let doc = spec(vec![]);
        let mut session = GenerationSession::new(&doc);

        let cases = [
            ("string", TypeNode::string()),
            ("Integer", TypeNode::int()),
            ("boolean", TypeNode::bool()),
            ("number", TypeNode::float()),
            ("float", TypeNode::float()),
            ("datetime", TypeNode::primitive(Primitive::DateTime)),
            ("date", TypeNode::primitive(Primitive::Date)),
            ("array", TypeNode::list(TypeNode::Any)),
            ("", TypeNode::string()),
            ("object", TypeNode::Any),
        ];
        for (ty, expected) in cases {
            assert_eq!(
                session.resolve_type("Project", "x", &FieldSpec::of_type(ty)),
                expected,
                "type {ty:?}"
            );
        }
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_string_format_maps_to_temporal() {
        let doc = spec(vec![]);
        let mut session = GenerationSession::new(&doc);
        let field = FieldSpec {
            format: Some("date-time".into()),
            ..FieldSpec::of_type("string")
        };
        assert_eq!(
            session.resolve_type("Task", "created_at", &field),
            TypeNode::primitive(Primitive::DateTime)
        );
    }

    #[test]
    fn test_unknown_type_degrades_with_diagnostic() {
        let doc = spec(vec![]);
        let mut session = GenerationSession::new(&doc);
        let ty = session.resolve_type("Project", "blob", &FieldSpec::of_type("binary-ish"));

        assert_eq!(ty, TypeNode::Any);
        assert_eq!(session.diagnostics().len(), 1);
        assert_eq!(session.diagnostics()[0].location.as_deref(), Some("Project.blob"));
    }

    #[test]
    fn test_unresolved_reference_warns() {
        let doc = spec(vec![]);
        let mut session = GenerationSession::new(&doc);
        let ty = session.resolve_type("Project", "owner", &FieldSpec::reference("User"));

        assert_eq!(ty, TypeNode::Any);
        let diag = &session.diagnostics()[0];
        assert!(diag.severity.is_warning());
        assert!(diag.message.contains("'User'"));
    }

    #[test]
    fn test_reference_synthesizes_schema_once() {
        let doc = spec(vec![object("User", vec![("name", FieldSpec::of_type("string"))])]);
        let mut session = GenerationSession::new(&doc);

        let first = session.resolve_type("Project", "owner", &FieldSpec::reference("User"));
        let second = session.resolve_type("Task", "owner", &FieldSpec::reference("User"));

        assert_eq!(first, TypeNode::model("User"));
        assert_eq!(first, second);
        assert_eq!(session.models().len(), 1);
    }

    #[test]
    fn test_inline_object_becomes_nested_model() {
        let doc = spec(vec![]);
        let mut session = GenerationSession::new(&doc);
        let field = FieldSpec {
            properties: Some(ObjectSpec::default()),
            ..FieldSpec::of_type("object")
        };

        let ty = session.resolve_type("Project", "settings", &field);
        assert_eq!(ty, TypeNode::model("ProjectSettings"));
        assert_eq!(session.models()[0].name(), "ProjectSettings");
    }

    #[test]
    fn test_array_items() {
        let doc = spec(vec![]);
        let mut session = GenerationSession::new(&doc);

        let inline = FieldSpec {
            items: Some(Box::new(FieldSpec {
                properties: Some(ObjectSpec::default()),
                ..Default::default()
            })),
            ..FieldSpec::of_type("array")
        };
        assert_eq!(
            session.resolve_type("Project", "members", &inline),
            TypeNode::list(TypeNode::model("ProjectMembersItem"))
        );

        let ints = FieldSpec {
            items: Some(Box::new(FieldSpec::of_type("integer"))),
            ..FieldSpec::of_type("array")
        };
        assert_eq!(
            session.resolve_type("Project", "ids", &ints),
            TypeNode::list(TypeNode::int())
        );

        let unknown = FieldSpec {
            items: Some(Box::new(FieldSpec::default())),
            ..FieldSpec::of_type("array")
        };
        assert_eq!(
            session.resolve_type("Project", "misc", &unknown),
            TypeNode::list(TypeNode::Any)
        );
    }

    #[test]
    fn test_enum_members() {
        let doc = spec(vec![]);
        let mut session = GenerationSession::new(&doc);
        let field = FieldSpec {
            enum_values: vec!["Open".into(), "in progress".into(), "in-progress".into()],
            ..FieldSpec::of_type("string")
        };

        let ty = session.resolve_type("Project", "status", &field);
        assert_eq!(ty, TypeNode::enumeration("ProjectStatusEnum"));

        let model = session.models()[0].as_enum().unwrap();
        let idents: Vec<_> = model.members.iter().map(|m| m.ident.as_str()).collect();
        assert_eq!(idents, vec!["OPEN", "IN_PROGRESS", "IN_PROGRESS_2"]);
        assert_eq!(model.members[2].value, "in-progress");
    }

    #[test]
    fn test_slash_union() {
        let doc = spec(vec![]);
        let mut session = GenerationSession::new(&doc);

        assert_eq!(
            session.resolve_type("Task", "owner", &FieldSpec::of_type("integer/string")),
            TypeNode::union("TaskOwnerUnion", vec![TypeNode::int(), TypeNode::string()])
        );
        assert_eq!(
            session.resolve_type("Task", "size", &FieldSpec::of_type("int/integer")),
            TypeNode::int()
        );
    }

    #[test]
    fn test_alias_schema_is_inlined() {
        let alias = SchemaDefinition {
            name: "Tags".into(),
            alias: Some(FieldSpec {
                items: Some(Box::new(FieldSpec::of_type("string"))),
                ..FieldSpec::of_type("array")
            }),
            ..Default::default()
        };
        let doc = spec(vec![alias]);
        let mut session = GenerationSession::new(&doc);

        assert_eq!(
            session.resolve_type("Task", "tags", &FieldSpec::reference("Tags")),
            TypeNode::list(TypeNode::string())
        );
        assert!(session.models().is_empty());
    }

    #[test]
    fn test_token_naming_schema_resolves_to_model() {
        let doc = spec(vec![object("Project", vec![])]);
        let mut session = GenerationSession::new(&doc);

        assert_eq!(
            session.resolve_type("Task", "owner", &FieldSpec::of_type("integer/project")),
            TypeNode::union("TaskOwnerUnion", vec![TypeNode::int(), TypeNode::model("Project")])
        );
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_union_name_avoids_schema_with_same_name() {
        let doc = spec(vec![object("TaskOwnerUnion", vec![("id", FieldSpec::of_type("string"))])]);
        let mut session = GenerationSession::new(&doc);

        let owner = session.resolve_type("Task", "owner", &FieldSpec::of_type("integer/string"));
        let named = session.resolve_type("Task", "link", &FieldSpec::reference("TaskOwnerUnion"));

        assert_eq!(
            owner,
            TypeNode::union("TaskOwnerUnion2", vec![TypeNode::int(), TypeNode::string()])
        );
        assert_eq!(named, TypeNode::model("TaskOwnerUnion"));
    }

    #[test]
    fn test_repeated_inline_names_stay_distinct() {
        let doc = spec(vec![]);
        let mut session = GenerationSession::new(&doc);
        let status = |values: &[&str]| FieldSpec {
            enum_values: values.iter().map(|v| v.to_string()).collect(),
            ..FieldSpec::of_type("string")
        };

        let first = session.resolve_type("List", "status", &status(&["doing", "done"]));
        let second = session.resolve_type("List", "status", &status(&["wait", "closed"]));

        assert_eq!(first, TypeNode::enumeration("ListStatusEnum"));
        assert_eq!(second, TypeNode::enumeration("ListStatusEnum2"));
        let values: Vec<_> = session.models()[1]
            .as_enum()
            .unwrap()
            .members
            .iter()
            .map(|m| m.value.as_str())
            .collect();
        assert_eq!(values, vec!["wait", "closed"]);
    }
}
