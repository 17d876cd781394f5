//! Indentation of generated source.

/// Width of one indentation level, in spaces.
///
/// Both backends indent with spaces only: rustfmt's default for Rust
/// and the usual prettier default for TypeScript and JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(u8);

impl Indent {
    pub const RUST: Self = Self(4);
    pub const TYPESCRIPT: Self = Self(2);

    pub const fn spaces(width: u8) -> Self {
        Self(width)
    }

    pub fn width(&self) -> usize {
        usize::from(self.0)
    }

    /// Append `level` indentation levels to `buffer`.
    pub fn write_to(&self, buffer: &mut String, level: usize) {
        buffer.extend(std::iter::repeat_n(' ', self.width() * level));
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::RUST
    }
}
