use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile, package_name, semver};
use sdkgen_ir::SdkMeta;

use super::MANIFEST_HEADER;

const DEFAULT_EDITION: &str = "2024";

/// The Cargo.toml manifest of the generated crate.
pub struct CargoToml {
    pub name: String,
    pub version: String,
    pub edition: String,
    pub description: Option<String>,
    pub dependencies: Vec<(String, String)>,
}

impl CargoToml {
    pub fn new(meta: &SdkMeta) -> Self {
        Self {
            name: package_name(&meta.name),
            version: semver(&meta.version),
            edition: DEFAULT_EDITION.to_string(),
            description: meta.description.clone(),
            dependencies: vec![
                (
                    "serde".to_string(),
                    r#"{ version = "1", features = ["derive"] }"#.to_string(),
                ),
                ("serde_json".to_string(), "1".to_string()),
                ("thiserror".to_string(), "2".to_string()),
            ],
        }
    }

    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies.push((name.into(), version.into()));
        self
    }

    /// Add chrono when the SDK has date or date-time values.
    pub fn with_temporal(self, uses_temporal: bool) -> Self {
        if uses_temporal {
            self.with_dependency("chrono", r#"{ version = "0.4", features = ["serde"] }"#)
        } else {
            self
        }
    }
}

/// A TOML basic string, quoted and escaped.
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl GeneratedFile for CargoToml {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("Cargo.toml")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(MANIFEST_HEADER)
    }

    fn render(&self) -> String {
        let mut out = format!(
            "[package]\nname = {}\nversion = {}\nedition = {}\n",
            toml_string(&self.name),
            toml_string(&self.version),
            toml_string(&self.edition),
        );
        if let Some(description) = &self.description {
            out.push_str(&format!("description = {}\n", toml_string(description)));
        }

        out.push_str("\n[dependencies]\n");
        for (dep_name, dep_version) in &self.dependencies {
            if dep_version.starts_with('{') {
                out.push_str(&format!("{} = {}\n", dep_name, dep_version));
            } else {
                out.push_str(&format!("{} = {}\n", dep_name, toml_string(dep_version)));
            }
        }

        out
    }
}
