//! API document parsing for the sdkgen client generator.
//!
//! Two document flavors are understood and normalized into one [`ApiSpec`]:
//!
//! - the legacy grouped-methods layout, `{"groups": {<group>: [<method>]}}`
//! - OpenAPI-style documents with `components.schemas` and `paths`
//!
//! Documents may be JSON or YAML; the format is picked from the file
//! extension.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod legacy;
mod openapi;
mod spec;

use std::path::Path;

pub use error::{Error, Result, SourceContext};
pub use legacy::response_model_name;
pub use openapi::ref_name;
use serde_json::Value;
pub use spec::{
    ApiSpec, EndpointSpec, FieldSpec, Flavor, ObjectSpec, ParamIn, ParamSpec, RequestBody,
    SchemaDefinition,
};

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    #[default]
    Json,
    Yaml,
}

impl SourceFormat {
    /// `.yaml`/`.yml` files are YAML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Detect the document flavor from its top-level keys.
pub fn detect_flavor(value: &Value) -> Option<Flavor> {
    let root = value.as_object()?;
    if root.get("groups").is_some_and(Value::is_object) {
        return Some(Flavor::Legacy);
    }
    ["openapi", "swagger", "paths", "components"]
        .iter()
        .any(|key| root.contains_key(*key))
        .then_some(Flavor::OpenApi)
}

/// Parse an API document from the given path.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ApiSpec> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    let filename = path.display().to_string();
    parse_str_with_filename(&content, &filename, SourceFormat::from_path(path))
}

/// Parse a JSON API document from a string.
pub fn parse_str(content: &str) -> Result<ApiSpec> {
    parse_str_with_filename(content, "api_docs.json", SourceFormat::Json)
}

/// Parse an API document from a string with a filename for error reporting.
pub fn parse_str_with_filename(
    content: &str,
    filename: &str,
    format: SourceFormat,
) -> Result<ApiSpec> {
    let ctx = SourceContext::new(content, filename);

    let value: Value = match format {
        SourceFormat::Json => serde_json::from_str(content).map_err(|e| ctx.json_error(e))?,
        SourceFormat::Yaml => serde_yaml::from_str(content).map_err(|e| ctx.yaml_error(e))?,
    };

    match detect_flavor(&value) {
        Some(Flavor::Legacy) => legacy::load(value, &ctx),
        Some(Flavor::OpenApi) => openapi::load(value, &ctx),
        None => Err(ctx.unknown_format()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_detect_flavor() {
        assert_eq!(
            detect_flavor(&json!({"groups": {}})),
            Some(Flavor::Legacy)
        );
        assert_eq!(
            detect_flavor(&json!({"openapi": "3.0.0"})),
            Some(Flavor::OpenApi)
        );
        assert_eq!(detect_flavor(&json!({"paths": {}})), Some(Flavor::OpenApi));
        assert_eq!(detect_flavor(&json!({"groups": []})), None);
        assert_eq!(detect_flavor(&json!([1, 2])), None);
    }

    #[test]
    fn test_source_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("api/openapi.YAML")),
            SourceFormat::Yaml
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("api_docs.json")),
            SourceFormat::Json
        );
        assert_eq!(SourceFormat::from_path(Path::new("docs")), SourceFormat::Json);
    }

    #[test]
    fn test_unknown_format() {
        let err = parse_str(r#"{"hello": "world"}"#).unwrap_err();
        assert!(matches!(*err, Error::UnknownFormat { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_str("{\"groups\": ").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_yaml_document() {
        let yaml = r#"
openapi: 3.0.0
info:
  title: Tasks
  version: 1.2
paths:
  /tasks:
    get:
      operationId: listTasks
      responses:
        "200":
          description: ok
"#;
        let spec = parse_str_with_filename(yaml, "openapi.yaml", SourceFormat::Yaml).unwrap();
        assert_eq!(spec.flavor, Flavor::OpenApi);
        assert_eq!(spec.title.as_deref(), Some("Tasks"));
        assert_eq!(spec.version.as_deref(), Some("1.2"));
        assert_eq!(spec.endpoints[0].operation_id.as_deref(), Some("listTasks"));
        assert!(spec.endpoints[0].responses.contains_key("200"));
    }
}
