//! Language-specific abstractions.
//!
//! - [`LanguageCodegen`] - Main trait for language SDK generators
//! - [`NamingConvention`] - Language-specific naming rules
//! - [`UniqueNames`] - Per-scope name deduplication
//! - [`GenerateResult`] - Result of code generation
//! - [`PreviewFile`] - Generated file preview

mod naming;
mod traits;

pub use naming::{NamingConvention, UniqueNames};
pub use traits::{GenerateResult, LanguageCodegen, PreviewFile};
