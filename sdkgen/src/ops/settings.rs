//! Effective settings: config file values overridden by flags.

use std::path::PathBuf;

use sdkgen_document::ApiSpec;
use sdkgen_ir::SdkMeta;

use crate::config::{Config, Language, PackageConfig};

const DEFAULT_NAME: &str = "sdk";
const DEFAULT_VERSION: &str = "0.1.0";

/// What one run works on.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub language: Language,
    pub package: PackageConfig,
}

impl Settings {
    pub fn new(config: Config) -> Self {
        Self {
            input: config.input.path,
            output: config.output.dir,
            language: config.output.language,
            package: config.package,
        }
    }

    pub fn input(mut self, input: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input = input;
        }
        self
    }

    pub fn output(mut self, output: Option<PathBuf>) -> Self {
        if let Some(output) = output {
            self.output = output;
        }
        self
    }

    pub fn language(mut self, language: Option<Language>) -> Self {
        if let Some(language) = language {
            self.language = language;
        }
        self
    }

    /// Package metadata: configured values first, then the document's
    /// title, version and description.
    pub fn meta(&self, spec: &ApiSpec) -> SdkMeta {
        let package = &self.package;
        SdkMeta {
            name: package
                .name
                .clone()
                .or_else(|| spec.title.clone())
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            version: package
                .version
                .clone()
                .or_else(|| spec.version.clone())
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            description: package
                .description
                .clone()
                .or_else(|| spec.description.clone()),
        }
    }
}
