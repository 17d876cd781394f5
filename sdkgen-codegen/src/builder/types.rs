//! Rendering of IR type expressions into target-language syntax.

use sdkgen_ir::{Primitive, TypeNode};

/// Maps [`TypeNode`] trees to language-specific type strings.
///
/// Implement this trait to support a new target language's type system;
/// [`render_type`](TypeMapper::render_type) walks the tree.
pub trait TypeMapper {
    /// Map a primitive kind.
    fn map_primitive(&self, ty: Primitive) -> String;

    /// Map a nullable type (e.g., `Option<T>`, `T | null`).
    fn map_optional(&self, inner: &str) -> String;

    /// Map a list type (e.g., `Vec<T>`, `T[]`).
    fn map_list(&self, inner: &str) -> String;

    /// Map the untyped passthrough (e.g., `serde_json::Value`, `unknown`).
    fn map_any(&self) -> String;

    /// Map a reference to a generated model or enum.
    fn map_named(&self, name: &str) -> String {
        name.to_string()
    }

    /// Map a union. `members` are already rendered.
    fn map_union(&self, name: &str, members: &[String]) -> String;

    /// Render a complete type expression.
    fn render_type(&self, ty: &TypeNode) -> String {
        match ty {
            TypeNode::Primitive(p) => self.map_primitive(*p),
            TypeNode::Any => self.map_any(),
            TypeNode::Model(name) | TypeNode::Enum(name) => self.map_named(name),
            TypeNode::List(inner) => {
                let inner_str = self.render_type(inner);
                self.map_list(&inner_str)
            }
            TypeNode::Optional(inner) => {
                let inner_str = self.render_type(inner);
                self.map_optional(&inner_str)
            }
            TypeNode::Union { name, members } => {
                let rendered: Vec<_> = members.iter().map(|m| self.render_type(m)).collect();
                self.map_union(name, &rendered)
            }
        }
    }
}
