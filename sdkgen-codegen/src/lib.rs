//! Schema-to-code synthesis for the sdkgen client generator.
//!
//! This crate turns a loaded [`ApiSpec`](sdkgen_document::ApiSpec) into the
//! language-agnostic [`SdkIR`](sdkgen_ir::SdkIR) and provides the building
//! blocks language backends use to render it (e.g. `sdkgen-codegen-rust`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, TypeMapper)
//! - [`language`] - Language-specific abstractions (LanguageCodegen, NamingConvention, etc.)
//! - [`synthesis`] - Type resolution, model and operation synthesis
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
mod diagnostic;
pub mod language;
pub mod synthesis;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use builder::{CodeBuilder, TypeMapper};
pub use diagnostic::{Diagnostic, Severity};
pub use language::{GenerateResult, LanguageCodegen, NamingConvention, PreviewFile, UniqueNames};
pub use synthesis::{GenerationSession, SynthesisOutput, synthesize};
