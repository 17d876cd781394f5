//! TypeScript import builder.

use sdkgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// Builder for TypeScript import statements.
///
/// Named entries may carry an inline `type` modifier (`type Foo`), which
/// keeps type-only names erasable under `verbatimModuleSyntax`.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    named: Vec<String>,
    type_only: bool,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            named: Vec::new(),
            type_only: false,
        }
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Import a named export as a type.
    pub fn named_type(self, name: impl AsRef<str>) -> Self {
        self.named(format!("type {}", name.as_ref()))
    }

    /// Make this a type-only import (`import type { ... }`).
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    fn statement(&self) -> String {
        if self.named.is_empty() {
            return format!("import \"{}\";", self.from);
        }
        let type_kw = if self.type_only { "type " } else { "" };
        format!(
            "import {}{{ {} }} from \"{}\";",
            type_kw,
            self.named.join(", "),
            self.from
        )
    }

    /// Render the import to a CodeBuilder.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        builder.line(&self.statement())
    }

    /// Build the import as a string.
    pub fn build(&self) -> String {
        self.render(CodeBuilder::typescript()).build()
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.statement())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_import() {
        let i = Import::new("./base.ts").named("Model").build();
        assert_eq!(i, "import { Model } from \"./base.ts\";\n");
    }

    #[test]
    fn test_mixed_type_import() {
        let i = Import::new("./base.ts")
            .named("BaseApi")
            .named_type("Response")
            .build();
        assert_eq!(i, "import { BaseApi, type Response } from \"./base.ts\";\n");
    }

    #[test]
    fn test_type_only_import() {
        let i = Import::new("../transport.ts")
            .named("HttpMethod")
            .named("Transport")
            .type_only()
            .build();
        assert_eq!(
            i,
            "import type { HttpMethod, Transport } from \"../transport.ts\";\n"
        );
    }

    #[test]
    fn test_side_effect_import() {
        let i = Import::new("./polyfill.ts").build();
        assert_eq!(i, "import \"./polyfill.ts\";\n");
    }
}
