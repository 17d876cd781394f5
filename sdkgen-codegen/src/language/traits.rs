//! Language-agnostic code generation traits.

use std::path::Path;

use eyre::Result;

/// Trait for language-specific SDK generators.
///
/// Implement this trait to add support for generating an SDK in a new
/// language.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "rust", "typescript")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "rs", "ts")
    fn file_extension(&self) -> &'static str;

    /// Preview generated files without writing to disk
    fn preview(&self) -> Vec<PreviewFile>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files that were written, relative to the output directory
    pub written: Vec<String>,
    /// Files left untouched because they already existed
    pub skipped: Vec<String>,
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}
