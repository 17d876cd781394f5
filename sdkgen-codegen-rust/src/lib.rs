//! Rust SDK generator for sdkgen.
//!
//! Renders a synthesized [`SdkIR`](sdkgen_ir::SdkIR) as a library crate:
//! serde models with `to_map`/`from_map` conversion, one async API struct
//! per group, and a `Transport` trait the user implements for networking.
//!
//! # Example
//!
//! ```ignore
//! let output = sdkgen_codegen::synthesize(&document, meta);
//! Generator::new(&output.ir).generate(Path::new("sdk"))?;
//! ```

mod ast;
mod boxing;
pub mod files;
mod generator;
mod naming;
mod rust_file;
mod type_mapper;

pub use ast::{Enum, Field, Fn, Impl, Param, Struct, Variant};
pub use generator::Generator;
pub use naming::RUST_NAMING;
pub use rust_file::{RawCode, RustFile, Use};
pub use sdkgen_codegen::LanguageCodegen;
pub use type_mapper::RustTypeMapper;
