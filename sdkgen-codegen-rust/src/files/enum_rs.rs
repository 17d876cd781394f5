use std::path::{Path, PathBuf};

use sdkgen_codegen::UniqueNames;
use sdkgen_core::{FileRules, GeneratedFile};
use sdkgen_ir::{EnumModel, EnumRepr};

use super::GENERATED_HEADER;
use crate::{
    Enum, Fn, Impl, Param, RawCode, RustFile, Variant,
    naming::{RUST_NAMING, string_literal},
};

/// One models/<name>.rs file holding an enum. String enums derive serde
/// with a rename per variant; integer enums get hand-written impls that
/// read and write JSON numbers.
pub struct EnumRs<'a> {
    model: &'a EnumModel,
    stem: String,
    variants: Vec<(String, &'a str)>,
}

/// Member identifiers keep their upper-case spelling; characters that
/// cannot appear in an identifier become `_`.
fn variant_ident(ident: &str) -> String {
    let cleaned: String = ident
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if cleaned.chars().all(|c| c == '_') {
        "VALUE".to_string()
    } else if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", cleaned)
    } else {
        cleaned
    }
}

impl<'a> EnumRs<'a> {
    pub fn new(model: &'a EnumModel, stem: impl Into<String>) -> Self {
        let mut names = UniqueNames::default();
        let variants = model
            .members
            .iter()
            .map(|m| (names.claim(&variant_ident(&m.ident)), m.value.as_str()))
            .collect();
        Self {
            model,
            stem: stem.into(),
            variants,
        }
    }

    fn type_name(&self) -> String {
        RUST_NAMING.type_name(&self.model.name)
    }

    fn definition(&self) -> Enum {
        let mut def = Enum::new(self.type_name());
        if let Some(doc) = &self.model.doc {
            def = def.doc(doc);
        }
        def = def
            .attr("allow(non_camel_case_types, clippy::upper_case_acronyms)")
            .derive("Debug")
            .derive("Clone")
            .derive("Copy")
            .derive("PartialEq")
            .derive("Eq")
            .derive("Hash");
        if self.model.repr == EnumRepr::Integer {
            for (ident, _) in &self.variants {
                def = def.variant(Variant::new(ident));
            }
            return def;
        }

        def = def.derive("serde::Serialize").derive("serde::Deserialize");
        for (ident, value) in &self.variants {
            def = def.variant(
                Variant::new(ident).attr(format!("serde(rename = {})", string_literal(value))),
            );
        }
        def
    }

    /// Serde impls for an integer enum.
    fn integer_serde(&self) -> RawCode {
        let name = self.type_name();
        let arms = |to_value: bool| -> Vec<String> {
            self.variants
                .iter()
                .map(|(ident, value)| {
                    let number = integer_literal(value);
                    if to_value {
                        format!("            Self::{ident} => {number},")
                    } else {
                        format!("            {number} => Ok(Self::{ident}),")
                    }
                })
                .collect()
        };

        let mut lines = vec![
            format!("impl serde::Serialize for {name} {{"),
            "    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {".to_string(),
            "        let value: i64 = match *self {".to_string(),
        ];
        lines.extend(arms(true));
        lines.extend([
            "        };".to_string(),
            "        serializer.serialize_i64(value)".to_string(),
            "    }".to_string(),
            "}".to_string(),
            String::new(),
            format!("impl<'de> serde::Deserialize<'de> for {name} {{"),
            "    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {".to_string(),
            "        match <i64 as serde::Deserialize>::deserialize(deserializer)? {".to_string(),
        ]);
        lines.extend(arms(false));
        lines.extend([
            format!(
                "            other => Err(serde::de::Error::custom(format!(\"unknown {name} value {{other}}\"))),"
            ),
            "        }".to_string(),
            "    }".to_string(),
            "}".to_string(),
        ]);
        RawCode::lines(lines)
    }

    fn as_str(&self) -> Impl {
        let mut body = vec!["match *self {".to_string()];
        for (ident, value) in &self.variants {
            body.push(format!("    Self::{} => {},", ident, string_literal(value)));
        }
        body.push("}".to_string());

        Impl::new(self.type_name()).method(
            Fn::new("as_str")
                .doc("The value as it appears on the wire.")
                .param(Param::receiver("&self"))
                .returns("&'static str")
                .body(body.join("\n")),
        )
    }

    fn display(&self) -> Impl {
        Impl::new(self.type_name())
            .for_trait("std::fmt::Display")
            .method(
                Fn::new("fmt")
                    .private()
                    .param(Param::receiver("&self"))
                    .param(Param::new("f", "&mut std::fmt::Formatter<'_>"))
                    .returns("std::fmt::Result")
                    .body_line("f.write_str(self.as_str())"),
            )
    }
}

impl GeneratedFile for EnumRs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src")
            .join("models")
            .join(format!("{}.rs", self.stem))
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        let file = RustFile::new().add(self.definition());
        let file = match self.model.repr {
            EnumRepr::Integer => file.add(self.integer_serde()),
            EnumRepr::String => file,
        };
        file.add(self.as_str()).add(self.display()).render()
    }
}

/// The canonical spelling of an integer value, usable as a pattern.
fn integer_literal(value: &str) -> String {
    let value = value.trim();
    value
        .parse::<i64>()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| value.to_string())
}
