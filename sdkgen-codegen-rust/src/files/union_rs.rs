use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use sdkgen_codegen::UniqueNames;
use sdkgen_core::{FileRules, GeneratedFile};
use sdkgen_ir::{Primitive, TypeNode};

use super::{GENERATED_HEADER, referenced_types};
use crate::{
    Enum, RustFile, RustTypeMapper, Use, Variant,
    boxing::Recursion,
    naming::RUST_NAMING,
};

/// One models/<name>.rs file holding an untagged union enum.
pub struct UnionRs<'a> {
    name: &'a str,
    members: &'a [TypeNode],
    stem: String,
    variants: Vec<(String, String)>,
}

/// Variant name for one union member.
fn member_variant(ty: &TypeNode) -> String {
    match ty {
        TypeNode::Primitive(p) => match p {
            Primitive::String => "String",
            Primitive::Int => "Int",
            Primitive::Float => "Float",
            Primitive::Bool => "Bool",
            Primitive::Date => "Date",
            Primitive::DateTime => "DateTime",
        }
        .to_string(),
        TypeNode::Any => "Value".to_string(),
        TypeNode::Model(name) | TypeNode::Enum(name) | TypeNode::Union { name, .. } => {
            RUST_NAMING.type_name(name)
        }
        TypeNode::List(inner) => format!("{}List", member_variant(inner)),
        TypeNode::Optional(inner) => member_variant(inner),
    }
}

impl<'a> UnionRs<'a> {
    pub fn new(
        name: &'a str,
        members: &'a [TypeNode],
        stem: impl Into<String>,
        recursion: &Recursion,
    ) -> Self {
        let mapper = RustTypeMapper::new();
        let boxed = |to: &str| recursion.needs_box(name, to);
        let mut names = UniqueNames::new("");

        let variants = members
            .iter()
            .map(|m| (names.claim(&member_variant(m)), mapper.render_field(m, &boxed)))
            .collect();

        Self {
            name,
            members,
            stem: stem.into(),
            variants,
        }
    }

    fn imports(&self) -> Option<Use> {
        let mut names = BTreeSet::new();
        for member in self.members {
            referenced_types(member, &mut names);
        }
        names.remove(self.name);

        let symbols: Vec<String> = names.iter().map(|n| RUST_NAMING.type_name(n)).collect();
        (!symbols.is_empty()).then(|| Use::new("super").symbols(symbols))
    }

    fn definition(&self) -> Enum {
        let mut def = Enum::new(RUST_NAMING.type_name(self.name))
            .doc("A value that may take any of the listed shapes; the first that fits wins.")
            .derive("Debug")
            .derive("Clone")
            .derive("PartialEq")
            .derive("serde::Serialize")
            .derive("serde::Deserialize")
            .attr("serde(untagged)");
        for (variant, ty) in &self.variants {
            def = def.variant(Variant::new(variant).tuple(ty));
        }
        def
    }
}

impl GeneratedFile for UnionRs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src")
            .join("models")
            .join(format!("{}.rs", self.stem))
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        RustFile::new()
            .use_group(self.imports())
            .add(self.definition())
            .render()
    }
}
