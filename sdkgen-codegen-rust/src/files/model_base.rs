use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{Enum, Field, RawCode, RustFile, Use, Variant};

/// The models/base.rs file: the `Model` trait every generated struct
/// implements, with mapping conversion and required-field validation.
pub struct ModelBase;

const MODEL_TRAIT: &str = r#"/// A generated data model.
pub trait Model: Serialize + DeserializeOwned {
    /// Schema name of the model.
    const NAME: &'static str;
    /// Wire names of the fields that must be present and non-null.
    const REQUIRED: &'static [&'static str];

    /// Convert the model into a key-value mapping. Absent optional fields
    /// are left out.
    fn to_map(&self) -> Result<Map<String, Value>, ModelError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Ok(Map::new()),
            Err(source) => Err(ModelError::Invalid {
                model: Self::NAME,
                source,
            }),
        }
    }

    /// Build the model from a key-value mapping, failing when a required
    /// field is missing or null.
    fn from_map(map: Map<String, Value>) -> Result<Self, ModelError> {
        for &field in Self::REQUIRED {
            if map.get(field).is_none_or(Value::is_null) {
                return Err(ModelError::MissingField {
                    model: Self::NAME,
                    field,
                });
            }
        }
        serde_json::from_value(Value::Object(map)).map_err(|source| ModelError::Invalid {
            model: Self::NAME,
            source,
        })
    }
}"#;

impl ModelBase {
    fn model_error(&self) -> Enum {
        Enum::new("ModelError")
            .doc("A model could not be built from, or turned into, a mapping.")
            .derive("Debug")
            .derive("thiserror::Error")
            .variant(
                Variant::new("MissingField")
                    .attr(r#"error("{model} is missing required field '{field}'")"#)
                    .field(Field::new("model", "&'static str"))
                    .field(Field::new("field", "&'static str")),
            )
            .variant(
                Variant::new("Invalid")
                    .attr(r#"error("invalid {model}")"#)
                    .field(Field::new("model", "&'static str"))
                    .field(Field::new("source", "serde_json::Error").attr("source")),
            )
    }
}

impl GeneratedFile for ModelBase {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join("models").join("base.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        RustFile::new()
            .use_group([
                Use::new("serde").symbols(["Serialize", "de::DeserializeOwned"]),
                Use::new("serde_json").symbols(["Map", "Value"]),
            ])
            .add(self.model_error())
            .add(RawCode::new(MODEL_TRAIT))
            .render()
    }
}
