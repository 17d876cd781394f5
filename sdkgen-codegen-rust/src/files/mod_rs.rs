use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{RawCode, RustFile};

/// A generated module exporting one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleExport {
    /// Module identifier, possibly raw (`r#type`).
    pub module: String,
    /// Exported type name.
    pub type_name: String,
}

/// The `mod.rs` of a generated directory: one private module per type,
/// each type re-exported, plus a public `base` module.
pub struct ModRs {
    dir: &'static str,
    base_exports: &'static [&'static str],
    modules: Vec<ModuleExport>,
}

impl ModRs {
    /// src/models/mod.rs.
    pub fn models(modules: Vec<ModuleExport>) -> Self {
        Self {
            dir: "models",
            base_exports: &[],
            modules,
        }
    }

    /// src/api/mod.rs, which also re-exports the error and response types.
    pub fn api(modules: Vec<ModuleExport>) -> Self {
        Self {
            dir: "api",
            base_exports: &["ApiError", "Response"],
            modules,
        }
    }
}

impl GeneratedFile for ModRs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join(self.dir).join("mod.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        let mods = std::iter::once("pub mod base;".to_string())
            .chain(self.modules.iter().map(|m| format!("mod {};", m.module)));

        let mut exports: Vec<String> = Vec::new();
        if !self.base_exports.is_empty() {
            exports.push(format!("pub use base::{{{}}};", self.base_exports.join(", ")));
        }
        exports.extend(
            self.modules
                .iter()
                .map(|m| format!("pub use {}::{};", m.module, m.type_name)),
        );

        let mut file = RustFile::new().add(RawCode::lines(mods));
        if !exports.is_empty() {
            file = file.add(RawCode::lines(exports));
        }
        file.render()
    }
}
