use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{Class, ClassField, CodeFile, Method, Param};

/// `src/models/base.ts`: the model base class and its construction error.
pub struct ModelBaseTs;

impl ModelBaseTs {
    fn model_error() -> Class {
        Class::new("ModelError")
            .extends("Error")
            .doc("Raised when a map is missing a field its model requires.")
            .field(ClassField::new("model", "string").readonly())
            .field(ClassField::new("field", "string").readonly())
            .method(
                Method::constructor()
                    .param(Param::new("model", "string"))
                    .param(Param::new("field", "string"))
                    .body_line("super(`${model}: missing required field \"${field}\"`);")
                    .body_line("this.name = \"ModelError\";")
                    .body_line("this.model = model;")
                    .body_line("this.field = field;"),
            )
    }

    fn model() -> Class {
        Class::new("Model")
            .abstract_()
            .doc("Common behaviour of the generated models.")
            .method(
                Method::new("toMap")
                    .doc("Convert to a plain map keyed by wire name, leaving out absent optional fields.")
                    .returns("Record<string, unknown>")
                    .body_line("const map: Record<string, unknown> = {};")
                    .body_line("for (const [key, value] of Object.entries(this)) {")
                    .body_line("  if (value !== null && value !== undefined) {")
                    .body_line("    map[key] = value;")
                    .body_line("  }")
                    .body_line("}")
                    .body_line("return map;"),
            )
            .method(
                Method::new("assertRequired")
                    .static_()
                    .doc("Throw a {@link ModelError} unless every field in `required` is present in `map`.")
                    .param(Param::new("model", "string"))
                    .param(Param::new("map", "Record<string, unknown>"))
                    .param(Param::new("required", "readonly string[]"))
                    .returns("void")
                    .body_line("for (const field of required) {")
                    .body_line("  if (map[field] === null || map[field] === undefined) {")
                    .body_line("    throw new ModelError(model, field);")
                    .body_line("  }")
                    .body_line("}"),
            )
    }
}

impl GeneratedFile for ModelBaseTs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join("models").join("base.ts")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        CodeFile::new()
            .add(Self::model_error())
            .add(Self::model())
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_base() {
        let content = ModelBaseTs.render();
        assert!(content.contains("export class ModelError extends Error {\n  readonly model: string;\n"));
        assert!(content.contains("export abstract class Model {\n"));
        assert!(content.contains("  toMap(): Record<string, unknown> {\n"));
        assert!(content.contains(
            "  static assertRequired(model: string, map: Record<string, unknown>, required: readonly string[]): void {\n"
        ));
        assert!(content.contains("      throw new ModelError(model, field);\n"));
    }
}
