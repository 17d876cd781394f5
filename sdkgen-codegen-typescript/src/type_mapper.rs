//! TypeScript type mapper implementation.

use sdkgen_codegen::TypeMapper;
use sdkgen_ir::{Primitive, TypeNode};

use crate::naming::TS_NAMING;

/// Maps IR type expressions to TypeScript type syntax.
///
/// Nested models are referred to through their `<Name>Fields` interface,
/// since values inside a parsed model are plain data. Unions render inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptTypeMapper;

impl TypeMapper for TypeScriptTypeMapper {
    fn map_primitive(&self, ty: Primitive) -> String {
        match ty {
            Primitive::String | Primitive::Date | Primitive::DateTime => "string",
            Primitive::Int | Primitive::Float => "number",
            Primitive::Bool => "boolean",
        }
        .to_string()
    }

    fn map_optional(&self, inner: &str) -> String {
        format!("{} | null", inner)
    }

    fn map_list(&self, inner: &str) -> String {
        if inner.contains(' ') {
            format!("Array<{}>", inner)
        } else {
            format!("{}[]", inner)
        }
    }

    fn map_any(&self) -> String {
        "unknown".to_string()
    }

    fn map_named(&self, name: &str) -> String {
        TS_NAMING.type_name(name)
    }

    fn map_union(&self, _name: &str, members: &[String]) -> String {
        members.join(" | ")
    }

    fn render_type(&self, ty: &TypeNode) -> String {
        match ty {
            TypeNode::Primitive(p) => self.map_primitive(*p),
            TypeNode::Any => self.map_any(),
            TypeNode::Model(name) => self.fields_name(name),
            TypeNode::Enum(name) => self.map_named(name),
            TypeNode::List(inner) => self.map_list(&self.render_type(inner)),
            TypeNode::Optional(inner) => self.map_optional(&self.render_type(inner)),
            TypeNode::Union { name, members } => {
                let rendered: Vec<_> = members.iter().map(|m| self.render_type(m)).collect();
                self.map_union(name, &rendered)
            }
        }
    }
}

impl TypeScriptTypeMapper {
    /// Name of the plain-data interface generated for a model.
    pub fn fields_name(&self, model: &str) -> String {
        format!("{}Fields", self.map_named(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typescript_primitives() {
        let mapper = TypeScriptTypeMapper;

        assert_eq!(mapper.map_primitive(Primitive::String), "string");
        assert_eq!(mapper.map_primitive(Primitive::Int), "number");
        assert_eq!(mapper.map_primitive(Primitive::Float), "number");
        assert_eq!(mapper.map_primitive(Primitive::Bool), "boolean");
        assert_eq!(mapper.map_primitive(Primitive::DateTime), "string");
    }

    #[test]
    fn test_typescript_render_type() {
        let mapper = TypeScriptTypeMapper;

        let members = TypeNode::optional(TypeNode::list(TypeNode::model("member")));
        assert_eq!(mapper.render_type(&members), "MemberFields[] | null");

        let owner = TypeNode::union("OwnerUnion", vec![TypeNode::int(), TypeNode::string()]);
        assert_eq!(mapper.render_type(&owner), "number | string");
        assert_eq!(mapper.render_type(&TypeNode::list(owner)), "Array<number | string>");

        assert_eq!(mapper.render_type(&TypeNode::enumeration("StatusEnum")), "StatusEnum");
        assert_eq!(mapper.render_type(&TypeNode::Any), "unknown");
    }
}
