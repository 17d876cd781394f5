//! Renderable trait and CodeFragment for decoupled code generation.
//!
//! AST nodes in the language backends turn themselves into fragments; the
//! [`CodeBuilder`](super::CodeBuilder) applies them with the right
//! indentation.

/// A fragment of generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line (newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// A sequence of fragments.
    Sequence(Vec<CodeFragment>),
    /// Documentation rendered as `///` lines.
    RustDoc(String),
    /// Documentation rendered as a `/** ... */` block.
    JsDoc(String),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn block(header: impl Into<String>, body: Vec<CodeFragment>, close: impl Into<String>) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close: Some(close.into()),
        }
    }

    pub fn rust_doc(s: impl Into<String>) -> Self {
        Self::RustDoc(s.into())
    }

    pub fn jsdoc(s: impl Into<String>) -> Self {
        Self::JsDoc(s.into())
    }
}

/// Types that can be rendered to code fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}

impl<T: Renderable> Renderable for [T] {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.iter().flat_map(Renderable::to_fragments).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Two;

    impl Renderable for Two {
        fn to_fragments(&self) -> Vec<CodeFragment> {
            vec![CodeFragment::line("a"), CodeFragment::line("b")]
        }
    }

    #[test]
    fn test_slice_flattens() {
        let nodes = [Two, Two];
        assert_eq!(nodes.as_slice().to_fragments().len(), 4);
    }

    #[test]
    fn test_block_constructor() {
        let block = CodeFragment::block("{", vec![], "}");
        assert_eq!(
            block,
            CodeFragment::Block {
                header: "{".into(),
                body: vec![],
                close: Some("}".into()),
            }
        );
    }
}
