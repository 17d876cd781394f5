//! Rust impl block builder.

use sdkgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::Fn;

/// Builder for Rust impl blocks.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    generics: Option<String>,
    trait_name: Option<String>,
    items: Vec<String>,
    methods: Vec<Fn>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            generics: None,
            trait_name: None,
            items: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Generic parameters of the impl, e.g. `T: Transport`.
    pub fn generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    /// Create an impl block for a trait.
    pub fn for_trait(mut self, trait_name: impl Into<String>) -> Self {
        self.trait_name = Some(trait_name.into());
        self
    }

    /// Add a one-line associated item, e.g. `const NAME: &'static str = "A";`.
    pub fn item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method);
        self
    }

    fn header(&self) -> String {
        let generics = self
            .generics
            .as_ref()
            .map(|g| format!("<{}>", g))
            .unwrap_or_default();
        match &self.trait_name {
            Some(trait_name) => format!("impl{} {} for {} {{", generics, trait_name, self.type_name),
            None => format!("impl{} {} {{", generics, self.type_name),
        }
    }

    /// Build the impl block as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Impl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.items.is_empty() && self.methods.is_empty() {
            return vec![CodeFragment::line(format!("{}}}", self.header()))];
        }

        let mut body: Vec<CodeFragment> = self.items.iter().map(CodeFragment::line).collect();
        for method in &self.methods {
            if !body.is_empty() {
                body.push(CodeFragment::Blank);
            }
            body.extend(method.to_fragments());
        }
        vec![CodeFragment::block(self.header(), body, "}")]
    }
}
