use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile};

/// The .gitignore file, written once.
pub struct GitIgnore;

impl GeneratedFile for GitIgnore {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(".gitignore")
    }

    fn rules(&self) -> FileRules {
        FileRules::create_once()
    }

    fn render(&self) -> String {
        "node_modules/\ndist/\n".to_string()
    }
}
