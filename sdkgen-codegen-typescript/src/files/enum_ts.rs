use std::path::{Path, PathBuf};

use sdkgen_codegen::UniqueNames;
use sdkgen_core::{FileRules, GeneratedFile};
use sdkgen_ir::{EnumModel, EnumRepr};

use super::GENERATED_HEADER;
use crate::{
    CodeFile, RawCode,
    naming::{TS_NAMING, property_key, string_literal},
};

/// One models/<name>.ts file holding an enum, written as a frozen object
/// plus a type of its values. Integer enums keep number values.
pub struct EnumTs<'a> {
    model: &'a EnumModel,
    stem: String,
    members: Vec<(String, &'a str)>,
}

impl<'a> EnumTs<'a> {
    pub fn new(model: &'a EnumModel, stem: impl Into<String>) -> Self {
        let mut names = UniqueNames::default();
        let members = model
            .members
            .iter()
            .map(|m| {
                let key = if m.ident.is_empty() { "VALUE" } else { m.ident.as_str() };
                (names.claim(key), m.value.as_str())
            })
            .collect();
        Self {
            model,
            stem: stem.into(),
            members,
        }
    }

    fn definition(&self) -> RawCode {
        let name = TS_NAMING.type_name(&self.model.name);
        let mut lines = Vec::new();
        if let Some(doc) = &self.model.doc {
            lines.push(format!("/** {} */", doc.replace("*/", "*\\/").replace('\n', " ")));
        }
        if self.members.is_empty() {
            lines.push(format!("export const {} = {{}} as const;", name));
        } else {
            lines.push(format!("export const {} = {{", name));
            for (key, value) in &self.members {
                let value = match self.model.repr {
                    EnumRepr::Integer => number_literal(value),
                    EnumRepr::String => string_literal(value),
                };
                lines.push(format!("  {}: {},", property_key(key), value));
            }
            lines.push("} as const;".to_string());
        }
        lines.push(String::new());
        lines.push(format!(
            "export type {0} = (typeof {0})[keyof typeof {0}];",
            name
        ));
        RawCode::new(lines.join("\n"))
    }
}

/// `+10` -> `10`
fn number_literal(value: &str) -> String {
    let value = value.trim();
    value
        .parse::<i64>()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| string_literal(value))
}

impl GeneratedFile for EnumTs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src")
            .join("models")
            .join(format!("{}.ts", self.stem))
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        CodeFile::new().add(self.definition()).render()
    }
}

#[cfg(test)]
mod tests {
    use sdkgen_ir::EnumMember;

    use super::*;

    fn member(ident: &str, value: &str) -> EnumMember {
        EnumMember {
            ident: ident.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_enum_ts() {
        let model = EnumModel {
            name: "StatusEnum".to_string(),
            doc: Some("Project status".to_string()),
            members: vec![
                member("OPEN", "Open"),
                member("CLOSED", "Closed"),
                member("IN-REVIEW", "in review"),
                member("OPEN", "open"),
            ],
            repr: EnumRepr::String,
        };
        let file = EnumTs::new(&model, "status-enum");
        assert_eq!(
            file.render(),
            "/** Project status */\n\
             export const StatusEnum = {\n  \
             OPEN: \"Open\",\n  \
             CLOSED: \"Closed\",\n  \
             \"IN-REVIEW\": \"in review\",\n  \
             OPEN_2: \"open\",\n\
             } as const;\n\
             \n\
             export type StatusEnum = (typeof StatusEnum)[keyof typeof StatusEnum];\n"
        );
        assert_eq!(
            file.path(Path::new("")),
            PathBuf::from("src/models/status-enum.ts")
        );
    }

    #[test]
    fn test_empty_enum() {
        let model = EnumModel {
            name: "Nothing".to_string(),
            doc: None,
            members: Vec::new(),
            repr: EnumRepr::String,
        };
        let content = EnumTs::new(&model, "nothing").render();
        assert!(content.starts_with("export const Nothing = {} as const;\n"));
    }

    #[test]
    fn test_integer_enum_keeps_numbers() {
        let model = EnumModel {
            name: "Priority".to_string(),
            doc: None,
            members: vec![member("1", "1"), member("_3", "-3"), member("10", "+10")],
            repr: EnumRepr::Integer,
        };
        let content = EnumTs::new(&model, "priority").render();

        assert!(content.contains("  _3: -3,\n"));
        assert!(content.contains(": 10,\n"));
        assert!(!content.contains("\"-3\""));
    }
}
