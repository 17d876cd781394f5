//! Rust struct builder.

use sdkgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::item_prelude;

/// A field in a Rust struct.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub attrs: Vec<String>,
    pub is_public: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            attrs: Vec::new(),
            is_public: true,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }
}

impl Renderable for Field {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let vis = if self.is_public { "pub " } else { "" };
        let mut fragments = item_prelude(self.doc.as_deref(), &[], &self.attrs);
        fragments.push(CodeFragment::line(format!("{}{}: {},", vis, self.name, self.ty)));
        fragments
    }
}

/// Builder for Rust structs.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    generics: Option<String>,
    doc: Option<String>,
    derives: Vec<String>,
    attrs: Vec<String>,
    fields: Vec<Field>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generics: None,
            doc: None,
            derives: Vec::new(),
            attrs: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Generic parameters without brackets, e.g. `T`.
    pub fn generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the struct as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = item_prelude(self.doc.as_deref(), &self.derives, &self.attrs);
        let generics = self
            .generics
            .as_ref()
            .map(|g| format!("<{}>", g))
            .unwrap_or_default();

        if self.fields.is_empty() {
            fragments.push(CodeFragment::line(format!(
                "pub struct {}{} {{}}",
                self.name, generics
            )));
        } else {
            fragments.push(CodeFragment::block(
                format!("pub struct {}{} {{", self.name, generics),
                self.fields.to_fragments(),
                "}",
            ));
        }
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_struct() {
        let s = Struct::new("Empty").build();
        assert_eq!(s, "pub struct Empty {}\n");
    }

    #[test]
    fn test_struct_with_fields() {
        let s = Struct::new("Project")
            .derive("Debug")
            .derive("Clone")
            .field(Field::new("name", "String").doc("Project name"))
            .field(
                Field::new("budget", "Option<f64>")
                    .attr("serde(default, skip_serializing_if = \"Option::is_none\")"),
            )
            .build();

        assert_eq!(
            s,
            "#[derive(Debug, Clone)]\n\
             pub struct Project {\n\
             \x20   /// Project name\n\
             \x20   pub name: String,\n\
             \x20   #[serde(default, skip_serializing_if = \"Option::is_none\")]\n\
             \x20   pub budget: Option<f64>,\n\
             }\n"
        );
    }

    #[test]
    fn test_generic_struct_with_private_field() {
        let s = Struct::new("TasksApi")
            .generics("T")
            .field(Field::new("base", "BaseApi<T>").private())
            .build();
        assert!(s.contains("pub struct TasksApi<T> {"));
        assert!(s.contains("    base: BaseApi<T>,"));
    }
}
