//! One [`GeneratedFile`](sdkgen_core::GeneratedFile) per unit of the
//! generated package.

use std::collections::{BTreeSet, HashMap};

pub use sdkgen_core::GENERATED_HEADER;
use sdkgen_ir::TypeNode;

mod api_base_ts;
mod api_ts;
mod enum_ts;
mod gitignore;
mod index_ts;
mod model_base_ts;
mod model_ts;
mod package_json;
mod transport_ts;
mod tsconfig;

pub use api_base_ts::ApiBaseTs;
pub use api_ts::ApiTs;
pub use enum_ts::EnumTs;
pub use gitignore::GitIgnore;
pub use index_ts::{IndexEntry, IndexTs};
pub use model_base_ts::ModelBaseTs;
pub use model_ts::ModelTs;
pub use package_json::PackageJson;
pub use transport_ts::TransportTs;
pub use tsconfig::TsConfig;

/// What a generated model name refers to inside `src/models/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelKind {
    Struct,
    Enum,
}

/// File stems of the generated model modules, keyed by IR model name.
#[derive(Debug, Clone, Default)]
pub struct ModelModules {
    modules: HashMap<String, (String, ModelKind)>,
}

impl ModelModules {
    pub fn insert(&mut self, name: impl Into<String>, stem: impl Into<String>, kind: ModelKind) {
        self.modules.insert(name.into(), (stem.into(), kind));
    }

    pub fn get(&self, name: &str) -> Option<(&str, &ModelKind)> {
        self.modules
            .get(name)
            .map(|(stem, kind)| (stem.as_str(), kind))
    }
}

/// Model and enum names a type expression mentions, including those
/// inside unions, which are rendered inline.
pub(crate) fn referenced_types(ty: &TypeNode, out: &mut BTreeSet<String>) {
    ty.walk(&mut |node| {
        if let TypeNode::Model(name) | TypeNode::Enum(name) = node {
            out.insert(name.clone());
        }
    });
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referenced_types_follow_unions() {
        let ty = TypeNode::optional(TypeNode::union(
            "OwnerUnion",
            vec![TypeNode::model("User"), TypeNode::enumeration("Team")],
        ));
        let mut out = BTreeSet::new();
        referenced_types(&ty, &mut out);
        assert_eq!(out.into_iter().collect::<Vec<_>>(), vec!["Team", "User"]);
    }

    #[test]
    fn test_join_doc() {
        assert_eq!(join_doc([None, Some(" ")]), None);
        assert_eq!(
            join_doc([Some("Get one project"), None, Some("Id of the project")]).as_deref(),
            Some("Get one project\n\nId of the project")
        );
    }
}
