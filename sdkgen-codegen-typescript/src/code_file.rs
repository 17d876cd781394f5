//! CodeFile abstraction for structured TypeScript file generation.
//!
//! A file is a list of sections (imports, then body items, then exports)
//! rendered with one blank line between sections and between body items.

use sdkgen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

use crate::ast::{Export, Import};

/// A structured representation of a TypeScript module.
///
/// # Example
///
/// ```
/// use sdkgen_codegen_typescript::{CodeFile, Import, RawCode};
///
/// let file = CodeFile::new()
///     .import(Import::new("./base.ts").named("Model"))
///     .add(RawCode::new("export abstract class Entity extends Model {}"))
///     .render();
///
/// assert_eq!(
///     file,
///     "import { Model } from \"./base.ts\";\n\nexport abstract class Entity extends Model {}\n"
/// );
/// ```
#[derive(Default)]
pub struct CodeFile {
    imports: Vec<Import>,
    body: Vec<Vec<CodeFragment>>,
    exports: Vec<Export>,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import statement. Imports without names are dropped.
    pub fn import(mut self, import: Import) -> Self {
        if !import.is_empty() {
            self.imports.push(import);
        }
        self
    }

    /// Add a body element.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        self.body.extend(nodes.into_iter().map(|n| n.to_fragments()));
        self
    }

    pub fn export(mut self, export: Export) -> Self {
        self.exports.push(export);
        self
    }

    pub fn exports(mut self, exports: impl IntoIterator<Item = Export>) -> Self {
        self.exports.extend(exports);
        self
    }

    /// Render with two-space indentation.
    pub fn render(&self) -> String {
        let mut sections: Vec<Vec<CodeFragment>> = Vec::new();
        if !self.imports.is_empty() {
            sections.push(self.imports.to_fragments());
        }
        sections.extend(self.body.iter().cloned());
        if !self.exports.is_empty() {
            sections.push(self.exports.to_fragments());
        }

        let mut builder = CodeBuilder::new(Indent::TYPESCRIPT);
        for (i, section) in sections.into_iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in section {
                builder.apply_fragment(fragment);
            }
        }
        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.body.is_empty() && self.exports.is_empty()
    }
}

/// Verbatim source text. Empty lines become blank lines without indentation.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.0
            .lines()
            .map(|line| {
                if line.is_empty() {
                    CodeFragment::Blank
                } else {
                    CodeFragment::line(line)
                }
            })
            .collect()
    }
}
