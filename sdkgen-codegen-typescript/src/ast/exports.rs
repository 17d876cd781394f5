//! TypeScript export builder.

use sdkgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// Builder for TypeScript re-export statements.
#[derive(Debug, Clone)]
pub struct Export {
    from: String,
    named: Vec<String>,
}

impl Export {
    /// Re-export from another module; with no names this is `export *`.
    pub fn from(module: impl Into<String>) -> Self {
        Self {
            from: module.into(),
            named: Vec::new(),
        }
    }

    /// Re-export a named item.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Re-export a named item as a type.
    pub fn named_type(self, name: impl AsRef<str>) -> Self {
        self.named(format!("type {}", name.as_ref()))
    }

    fn statement(&self) -> String {
        if self.named.is_empty() {
            format!("export * from \"{}\";", self.from)
        } else {
            format!(
                "export {{ {} }} from \"{}\";",
                self.named.join(", "),
                self.from
            )
        }
    }

    /// Render the export to a CodeBuilder.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        builder.line(&self.statement())
    }

    /// Build the export as a string.
    pub fn build(&self) -> String {
        self.render(CodeBuilder::typescript()).build()
    }
}

impl Renderable for Export {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.statement())]
    }
}
