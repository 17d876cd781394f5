//! One [`GeneratedFile`](sdkgen_core::GeneratedFile) per unit of the
//! generated crate.

use std::collections::BTreeSet;

pub use sdkgen_core::GENERATED_HEADER;
use sdkgen_ir::TypeNode;

/// Header for the generated `Cargo.toml`.
pub const MANIFEST_HEADER: &str = "# Code generated by sdkgen. DO NOT EDIT.";

mod api_base;
mod api_rs;
mod cargo_toml;
mod enum_rs;
mod gitignore;
mod lib_rs;
mod model_base;
mod mod_rs;
mod struct_rs;
mod transport_rs;
mod union_rs;

pub use api_base::ApiBase;
pub use api_rs::ApiRs;
pub use cargo_toml::CargoToml;
pub use enum_rs::EnumRs;
pub use gitignore::GitIgnore;
pub use lib_rs::LibRs;
pub use model_base::ModelBase;
pub use mod_rs::{ModRs, ModuleExport};
pub use struct_rs::StructRs;
pub use transport_rs::TransportRs;
pub use union_rs::UnionRs;

/// Generated type names a type expression mentions directly. Union
/// members are not followed; the union's own file imports them.
pub(crate) fn referenced_types(ty: &TypeNode, out: &mut BTreeSet<String>) {
    match ty {
        TypeNode::Model(name) | TypeNode::Enum(name) | TypeNode::Union { name, .. } => {
            out.insert(name.clone());
        }
        TypeNode::List(inner) | TypeNode::Optional(inner) => referenced_types(inner, out),
        TypeNode::Primitive(_) | TypeNode::Any => {}
    }
}

/// Doc text joined from optional paragraphs.
pub(crate) fn join_doc<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    let parts: Vec<&str> = parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join("\n\n"))
}
