//! Rust enum builder.

use sdkgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::{Field, item_prelude};

/// A variant in a Rust enum.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: String,
    pub doc: Option<String>,
    pub data: Option<String>,
    pub fields: Vec<Field>,
    pub attrs: Vec<String>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            data: None,
            fields: Vec::new(),
            attrs: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set tuple data for the variant, e.g., `Int(i64)`.
    pub fn tuple(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Add a named field, making this a struct variant. Fields are
    /// rendered without visibility.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field.private());
        self
    }

    /// Add an attribute to the variant, e.g., `serde(rename = "Open")`.
    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }
}

impl Renderable for Variant {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = item_prelude(self.doc.as_deref(), &[], &self.attrs);
        if !self.fields.is_empty() {
            fragments.push(CodeFragment::block(
                format!("{} {{", self.name),
                self.fields.to_fragments(),
                "},",
            ));
            return fragments;
        }
        fragments.push(CodeFragment::line(match &self.data {
            Some(data) => format!("{}({}),", self.name, data),
            None => format!("{},", self.name),
        }));
        fragments
    }
}

/// Builder for Rust enums.
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    attrs: Vec<String>,
    variants: Vec<Variant>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            attrs: Vec::new(),
            variants: Vec::new(),
        }
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

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Build the enum as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = item_prelude(self.doc.as_deref(), &self.derives, &self.attrs);
        if self.variants.is_empty() {
            fragments.push(CodeFragment::line(format!("pub enum {} {{}}", self.name)));
        } else {
            fragments.push(CodeFragment::block(
                format!("pub enum {} {{", self.name),
                self.variants.to_fragments(),
                "}",
            ));
        }
        fragments
    }
}
