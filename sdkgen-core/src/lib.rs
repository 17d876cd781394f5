//! Core utilities and types for the sdkgen client generator.
//!
//! This crate provides the generated-file abstraction shared by every
//! language backend, plus the case conversion helpers used for naming.

mod file;
mod package;
mod utils;

// File operations
pub use file::{FileRules, GeneratedFile, Overwrite, WriteResult};
// Package metadata
pub use package::{package_name, semver};
// String utilities
pub use utils::{
    capitalize, split_words, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case,
};

/// Header prepended to every generated source file.
pub const GENERATED_HEADER: &str = "// Code generated by sdkgen. DO NOT EDIT.";
