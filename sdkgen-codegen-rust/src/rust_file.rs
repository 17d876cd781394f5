//! RustFile abstraction for structured Rust file generation.
//!
//! Collects `use` statements and body items, and renders them with one
//! blank line between items.

use sdkgen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

/// A Rust use statement.
#[derive(Debug, Clone)]
pub struct Use {
    module: String,
    symbols: Vec<String>,
}

impl Use {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbols: Vec::new(),
        }
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    pub fn symbols(mut self, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    fn format(&self) -> String {
        match self.symbols.as_slice() {
            [] => format!("use {};", self.module),
            [single] => format!("use {}::{};", self.module, single),
            many => format!("use {}::{{{}}};", self.module, many.join(", ")),
        }
    }
}

impl Renderable for Use {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(self.format())]
    }
}

/// A structured representation of a Rust file.
///
/// # Example
///
/// ```
/// use sdkgen_codegen_rust::{RawCode, RustFile, Use};
///
/// let file = RustFile::new()
///     .use_stmt(Use::new("serde_json").symbol("Value"))
///     .add(RawCode::new("pub type Raw = Value;"))
///     .render();
///
/// assert_eq!(file, "use serde_json::Value;\n\npub type Raw = Value;\n");
/// ```
#[derive(Default)]
pub struct RustFile {
    inner_doc: Option<String>,
    uses: Vec<Vec<Use>>,
    body: Vec<Vec<CodeFragment>>,
}

impl RustFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `//!` module documentation.
    pub fn inner_doc(mut self, doc: impl Into<String>) -> Self {
        self.inner_doc = Some(doc.into());
        self
    }

    /// Add a use statement to the current import group.
    pub fn use_stmt(mut self, use_stmt: Use) -> Self {
        match self.uses.last_mut() {
            Some(group) => group.push(use_stmt),
            None => self.uses.push(vec![use_stmt]),
        }
        self
    }

    /// Add a group of use statements, separated from the others by a blank line.
    /// Empty groups are ignored.
    pub fn use_group(mut self, uses: impl IntoIterator<Item = Use>) -> Self {
        let group: Vec<Use> = uses.into_iter().collect();
        if !group.is_empty() {
            self.uses.push(group);
        }
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    /// Render the file with Rust indentation (4 spaces).
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new(Indent::RUST);
        let mut sections = 0;

        if let Some(doc) = &self.inner_doc {
            for line in doc.lines() {
                match line.trim_end() {
                    "" => builder.push_line("//!"),
                    line => builder.push_line(&format!("//! {line}")),
                };
            }
            sections += 1;
        }

        for group in &self.uses {
            if sections > 0 {
                builder.push_blank();
            }
            for use_stmt in group {
                builder.emit(use_stmt);
            }
            sections += 1;
        }

        for fragments in &self.body {
            if sections > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
            sections += 1;
        }

        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.inner_doc.is_none() && self.uses.is_empty() && self.body.is_empty()
    }
}

/// A raw code fragment that implements Renderable.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(
            lines
                .into_iter()
                .map(Into::into)
                .collect::<Vec<_>>()
                .join("\n"),
        )
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
                    CodeFragment::Line(line.to_string())
                }
            })
            .collect()
    }
}
