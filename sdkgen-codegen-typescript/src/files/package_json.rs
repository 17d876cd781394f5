use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile, package_name, semver};
use sdkgen_ir::SdkMeta;
use serde_json::{Map, Value, json};

use super::GENERATED_HEADER;

const TYPESCRIPT_VERSION: &str = "^5.6.0";

/// The package.json manifest of the generated package.
///
/// JSON has no comments, so the generated-code notice is carried in the
/// conventional `"//"` key.
pub struct PackageJson {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub dev_dependencies: Vec<(String, String)>,
}

impl PackageJson {
    pub fn new(meta: &SdkMeta) -> Self {
        Self {
            name: package_name(&meta.name),
            version: semver(&meta.version),
            description: meta.description.clone(),
            dev_dependencies: vec![("typescript".to_string(), TYPESCRIPT_VERSION.to_string())],
        }
    }

    pub fn with_dev_dependency(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.dev_dependencies.push((name.into(), version.into()));
        self
    }

    fn to_json(&self) -> Value {
        let notice = GENERATED_HEADER.trim_start_matches("// ");
        let mut package = Map::new();
        package.insert("//".into(), json!(notice));
        package.insert("name".into(), json!(self.name));
        package.insert("version".into(), json!(self.version));
        if let Some(description) = &self.description {
            package.insert("description".into(), json!(description));
        }
        package.insert("type".into(), json!("module"));
        package.insert("main".into(), json!("src/index.ts"));
        package.insert("types".into(), json!("src/index.ts"));
        package.insert("scripts".into(), json!({ "typecheck": "tsc --noEmit" }));

        let dev_dependencies: Map<String, Value> = self
            .dev_dependencies
            .iter()
            .map(|(name, version)| (name.clone(), json!(version)))
            .collect();
        package.insert("devDependencies".into(), Value::Object(dev_dependencies));
        Value::Object(package)
    }
}

impl GeneratedFile for PackageJson {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("package.json")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite()
    }

    fn render(&self) -> String {
        // Serializing a `Value` cannot fail.
        let mut out = serde_json::to_string_pretty(&self.to_json()).unwrap_or_default();
        out.push('\n');
        out
    }
}
