//! Top-level SDK description.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{ModelDef, Operation, StructModel, TypeNode};

/// Package metadata for the generated SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SdkMeta {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
}

/// One generated API class: every operation of a tag/group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiClass {
    /// Group or tag name from the document.
    pub group: String,
    /// Class name, e.g. `ProjectsApi`.
    pub name: String,
    pub operations: Vec<Operation>,
}

/// The complete SDK, ready for a backend to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SdkIR {
    pub meta: SdkMeta,
    /// Every registered model and enum, in emission order.
    pub models: Vec<ModelDef>,
    pub apis: Vec<ApiClass>,
}

impl SdkIR {
    pub fn find_model(&self, name: &str) -> Option<&ModelDef> {
        self.models.iter().find(|m| m.name() == name)
    }

    pub fn struct_models(&self) -> impl Iterator<Item = &StructModel> {
        self.models.iter().filter_map(ModelDef::as_struct)
    }

    /// Every distinct union type used by a model field or operation
    /// parameter. Synthesis gives each union a name no other symbol of the
    /// run uses, so a repeated name is the same union seen again.
    pub fn unions(&self) -> Vec<(&str, &[TypeNode])> {
        let mut seen = BTreeSet::new();
        let mut unions = Vec::new();

        let field_types = self
            .struct_models()
            .flat_map(|m| m.fields.iter().map(|f| &f.ty));
        let param_types = self
            .apis
            .iter()
            .flat_map(|api| &api.operations)
            .flat_map(|op| op.params.iter().map(|p| &p.ty));

        for ty in field_types.chain(param_types) {
            ty.walk(&mut |node| {
                if let TypeNode::Union { name, members } = node
                    && seen.insert(name.as_str())
                {
                    unions.push((name.as_str(), members.as_slice()));
                }
            });
        }

        unions
    }

    /// Check whether any generated symbol uses a temporal primitive.
    pub fn uses_temporal(&self) -> bool {
        self.struct_models().any(StructModel::uses_temporal)
            || self
                .apis
                .iter()
                .flat_map(|api| &api.operations)
                .any(Operation::uses_temporal)
    }
}
