use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile};
use sdkgen_ir::SdkMeta;

use super::GENERATED_HEADER;
use crate::{RawCode, RustFile};

/// The src/lib.rs crate root.
pub struct LibRs {
    doc: String,
}

impl LibRs {
    pub fn new(meta: &SdkMeta) -> Self {
        let doc = match meta.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => format!("Client SDK for {}.", meta.name),
        };
        Self { doc }
    }
}

impl GeneratedFile for LibRs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join("lib.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        RustFile::new()
            .inner_doc(&self.doc)
            .add(RawCode::lines(["pub mod api;", "pub mod models;", "pub mod transport;"]))
            .add(RawCode::lines([
                "pub use api::{ApiError, Response};",
                "pub use transport::{Request, Transport, TransportError};",
            ]))
            .render()
    }
}
