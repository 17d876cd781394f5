//! TypeScript interface builder.

use sdkgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A property of a TypeScript interface.
#[derive(Debug, Clone)]
pub struct InterfaceField {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub optional: bool,
}

impl InterfaceField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Builder for exported TypeScript interfaces.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    doc: Option<String>,
    fields: Vec<InterfaceField>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn field(mut self, field: InterfaceField) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the interface as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Interface {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut out = Vec::new();
        if let Some(doc) = &self.doc {
            out.push(CodeFragment::jsdoc(doc));
        }
        if self.fields.is_empty() {
            out.push(CodeFragment::line(format!(
                "export interface {} {{}}",
                self.name
            )));
            return out;
        }

        let mut body = Vec::new();
        for field in &self.fields {
            if let Some(doc) = &field.doc {
                body.push(CodeFragment::jsdoc(doc));
            }
            let optional = if field.optional { "?" } else { "" };
            body.push(CodeFragment::line(format!(
                "{}{}: {};",
                field.name, optional, field.ty
            )));
        }
        out.push(CodeFragment::block(
            format!("export interface {} {{", self.name),
            body,
            "}",
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_interface() {
        assert_eq!(
            Interface::new("EmptyFields").build(),
            "export interface EmptyFields {}\n"
        );
    }

    #[test]
    fn test_interface_fields() {
        let code = Interface::new("ProjectFields")
            .doc("Fields of a project.")
            .field(InterfaceField::new("name", "string").doc("Project name"))
            .field(InterfaceField::new("budget", "number | null").optional())
            .build();
        assert_eq!(
            code,
            "/** Fields of a project. */\n\
             export interface ProjectFields {\n  \
             /** Project name */\n  \
             name: string;\n  \
             budget?: number | null;\n\
             }\n"
        );
    }
}
