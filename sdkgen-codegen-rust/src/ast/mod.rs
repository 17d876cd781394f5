//! Rust AST builders for generating structs, enums, impls, and functions.
//!
//! These provide a high-level API for constructing Rust syntax, which is
//! rendered through [`Renderable`](sdkgen_codegen::builder::Renderable).

mod enums;
mod fns;
mod impls;
mod structs;

pub use enums::{Enum, Variant};
pub use fns::{Fn, Param};
pub use impls::Impl;
pub use structs::{Field, Struct};

use sdkgen_codegen::builder::CodeFragment;

/// Doc comment, derive and attribute lines shared by items.
fn item_prelude(doc: Option<&str>, derives: &[String], attrs: &[String]) -> Vec<CodeFragment> {
    let mut fragments = Vec::new();
    if let Some(doc) = doc {
        fragments.push(CodeFragment::rust_doc(doc));
    }
    if !derives.is_empty() {
        fragments.push(CodeFragment::line(format!("#[derive({})]", derives.join(", "))));
    }
    for attr in attrs {
        fragments.push(CodeFragment::line(format!("#[{}]", attr)));
    }
    fragments
}
