//! Rust type mapper implementation.

use sdkgen_codegen::TypeMapper;
use sdkgen_ir::{Primitive, TypeNode};

use crate::naming::RUST_NAMING;

/// Maps IR type expressions to Rust type syntax.
///
/// Models, enums and unions are referred to by their bare type name, or
/// through a module path when the mapper is [`qualified`](Self::qualified).
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper {
    module: Option<&'static str>,
}

impl TypeMapper for RustTypeMapper {
    fn map_primitive(&self, ty: Primitive) -> String {
        match ty {
            Primitive::String => "String".to_string(),
            Primitive::Int => "i64".to_string(),
            Primitive::Float => "f64".to_string(),
            Primitive::Bool => "bool".to_string(),
            Primitive::Date => "chrono::NaiveDate".to_string(),
            Primitive::DateTime => "chrono::DateTime<chrono::Utc>".to_string(),
        }
    }

    fn map_optional(&self, inner: &str) -> String {
        format!("Option<{}>", inner)
    }

    fn map_list(&self, inner: &str) -> String {
        format!("Vec<{}>", inner)
    }

    fn map_any(&self) -> String {
        "serde_json::Value".to_string()
    }

    fn map_named(&self, name: &str) -> String {
        match self.module {
            Some(module) => format!("{}::{}", module, RUST_NAMING.type_name(name)),
            None => RUST_NAMING.type_name(name),
        }
    }

    fn map_union(&self, name: &str, _members: &[String]) -> String {
        self.map_named(name)
    }
}

impl RustTypeMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapper that refers to generated types as `module::Name`.
    pub fn qualified(module: &'static str) -> Self {
        Self {
            module: Some(module),
        }
    }

    /// Render a field type, boxing direct references for which `boxed`
    /// returns true. Lists already provide indirection and are left alone.
    pub fn render_field(&self, ty: &TypeNode, boxed: &dyn Fn(&str) -> bool) -> String {
        match ty {
            TypeNode::Optional(inner) => self.map_optional(&self.render_field(inner, boxed)),
            TypeNode::Model(name) | TypeNode::Union { name, .. } if boxed(name) => {
                format!("Box<{}>", self.render_type(ty))
            }
            other => self.render_type(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_primitives() {
        let mapper = RustTypeMapper::new();

        assert_eq!(mapper.map_primitive(Primitive::String), "String");
        assert_eq!(mapper.map_primitive(Primitive::Int), "i64");
        assert_eq!(mapper.map_primitive(Primitive::Float), "f64");
        assert_eq!(mapper.map_primitive(Primitive::Bool), "bool");
        assert_eq!(mapper.map_primitive(Primitive::Date), "chrono::NaiveDate");
    }

    #[test]
    fn test_rust_render_type() {
        let mapper = RustTypeMapper::new();

        let ty = TypeNode::optional(TypeNode::list(TypeNode::model("project_detail")));
        assert_eq!(mapper.render_type(&ty), "Option<Vec<ProjectDetail>>");

        let union = TypeNode::union("TaskOwnerUnion", vec![TypeNode::int(), TypeNode::string()]);
        assert_eq!(mapper.render_type(&union), "TaskOwnerUnion");
        assert_eq!(mapper.render_type(&TypeNode::Any), "serde_json::Value");
    }

    #[test]
    fn test_rust_render_boxed_field() {
        let mapper = RustTypeMapper::new();
        let boxed = |name: &str| name == "Node";

        let parent = TypeNode::optional(TypeNode::model("Node"));
        assert_eq!(mapper.render_field(&parent, &boxed), "Option<Box<Node>>");

        let children = TypeNode::list(TypeNode::model("Node"));
        assert_eq!(mapper.render_field(&children, &boxed), "Vec<Node>");

        let other = TypeNode::model("Tag");
        assert_eq!(mapper.render_field(&other, &boxed), "Tag");
    }

    #[test]
    fn test_rust_qualified_names() {
        let mapper = RustTypeMapper::qualified("models");
        let ty = TypeNode::optional(TypeNode::list(TypeNode::model("Project")));
        assert_eq!(mapper.render_type(&ty), "Option<Vec<models::Project>>");
        assert_eq!(mapper.render_type(&TypeNode::int()), "i64");
    }
}
