use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{CodeFile, Export};

/// Names one module contributes to an index.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub stem: String,
    pub values: Vec<String>,
    pub types: Vec<String>,
}

impl IndexEntry {
    pub fn value(stem: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            values: vec![name.into()],
            types: Vec::new(),
        }
    }

    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.types.push(name.into());
        self
    }

    fn export(&self) -> Export {
        let export = self
            .values
            .iter()
            .fold(Export::from(format!("./{}.ts", self.stem)), |e, v| e.named(v));
        self.types.iter().fold(export, |e, t| e.named_type(t))
    }
}

/// An `index.ts` barrel module.
pub struct IndexTs {
    dir: Option<&'static str>,
    exports: Vec<Export>,
}

impl IndexTs {
    /// `src/index.ts`, re-exporting everything the package offers.
    pub fn root() -> Self {
        Self {
            dir: None,
            exports: vec![
                Export::from("./transport.ts"),
                Export::from("./models/index.ts"),
                Export::from("./api/index.ts"),
            ],
        }
    }

    /// `src/models/index.ts`.
    pub fn models(entries: &[IndexEntry]) -> Self {
        Self::barrel(
            "models",
            Export::from("./base.ts").named("Model").named("ModelError"),
            entries,
        )
    }

    /// `src/api/index.ts`.
    pub fn api(entries: &[IndexEntry]) -> Self {
        Self::barrel(
            "api",
            Export::from("./base.ts")
                .named("BaseApi")
                .named_type("Params")
                .named_type("Response"),
            entries,
        )
    }

    fn barrel(dir: &'static str, base: Export, entries: &[IndexEntry]) -> Self {
        let mut exports = vec![base];
        exports.extend(entries.iter().map(IndexEntry::export));
        Self {
            dir: Some(dir),
            exports,
        }
    }
}

impl GeneratedFile for IndexTs {
    fn path(&self, base: &Path) -> PathBuf {
        let src = base.join("src");
        match self.dir {
            Some(dir) => src.join(dir).join("index.ts"),
            None => src.join("index.ts"),
        }
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        CodeFile::new().exports(self.exports.clone()).render()
    }
}
