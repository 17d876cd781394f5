//! TypeScript syntax builders.
//!
//! Each builder renders through [`CodeBuilder`](sdkgen_codegen::CodeBuilder)
//! or as [`Renderable`](sdkgen_codegen::builder::Renderable) fragments.

mod class;
mod exports;
mod imports;
mod interface;

pub use class::{Class, ClassField, Method, Param};
pub use exports::Export;
pub use imports::Import;
pub use interface::{Interface, InterfaceField};
