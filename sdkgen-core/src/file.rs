use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

/// A file of the generated SDK.
///
/// Implementors only describe the file; writing, header handling and the
/// create-once policy live in the provided methods.
pub trait GeneratedFile {
    /// Location of the file under the output directory `base`.
    fn path(&self, base: &Path) -> PathBuf;

    fn rules(&self) -> FileRules;

    /// File body, without the header.
    fn render(&self) -> String;

    /// Full file content: header, blank line, body.
    fn contents(&self) -> String {
        let body = self.render();
        match self.rules().header {
            Some(header) if body.is_empty() => format!("{}\n", header),
            Some(header) => format!("{}\n\n{}", header, body),
            None => body,
        }
    }

    /// Write the file below `base`, honouring its [`Overwrite`] policy.
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        if self.rules().overwrite == Overwrite::IfMissing && path.exists() {
            return Ok(WriteResult::Skipped);
        }
        write_file(&path, &self.contents())?;
        Ok(WriteResult::Written)
    }
}

/// Write `content` to `path`, creating missing parent directories.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Outcome of [`GeneratedFile::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// A create-once file was already present.
    Skipped,
}

/// How a generated file is written.
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub overwrite: Overwrite,
    pub header: Option<&'static str>,
}

impl FileRules {
    /// Generated code: replaced on every run.
    pub fn always_overwrite() -> Self {
        Self::default()
    }

    /// Scaffolding the user may edit: only written when missing.
    pub fn create_once() -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
            header: None,
        }
    }

    /// Prepend a header comment when rendering.
    pub fn with_header(mut self, header: &'static str) -> Self {
        self.header = Some(header);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    #[default]
    Always,
    IfMissing,
}
