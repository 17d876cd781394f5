//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};
use crate::config::Language;

/// Report data from one generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub name: String,
    pub version: String,
    pub language: Language,

    /// Formatted synthesis diagnostics.
    pub diagnostics: Vec<String>,

    pub model_count: usize,
    pub api_count: usize,
    pub operation_count: usize,

    /// Files written, or the dry-run preview.
    pub result: GenerationResult,
}

#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Paths relative to `output_dir`.
    pub written: Vec<String>,
    /// Create-once files that already existed.
    pub skipped: Vec<String>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.diagnostics {
            out.diagnostic(diagnostic);
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.preformatted(&format!("{} v{} ({})", self.name, self.version, self.language));
        out.preformatted(&format!(
            "{} models, {} api groups, {} operations",
            self.model_count, self.api_count, self.operation_count
        ));
        out.newline();

        out.key_value("Generated", &written.output_dir.display().to_string());
        if !written.written.is_empty() {
            out.section(&format!("Written ({})", written.written.len()));
            for path in &written.written {
                out.added_item(path);
            }
        }
        if !written.skipped.is_empty() {
            out.newline();
            out.section("Kept existing");
            for path in &written.skipped {
                out.skipped_item(path);
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[PreviewFile]) {
        for file in files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", files.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    fn report(result: GenerationResult) -> GenerateReport {
        GenerateReport {
            name: "tasks".into(),
            version: "1.0.0".into(),
            language: Language::Rust,
            diagnostics: vec!["warning: unresolved reference `Missing`".into()],
            model_count: 2,
            api_count: 1,
            operation_count: 3,
            result,
        }
    }

    #[test]
    fn test_render_written() {
        let report = report(GenerationResult::Written(WrittenResult {
            output_dir: PathBuf::from("sdk"),
            written: vec!["src/lib.rs".into()],
            skipped: vec![".gitignore".into()],
        }));
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "! warning: unresolved reference `Missing`",
                "tasks v1.0.0 (rust)",
                "2 models, 1 api groups, 3 operations",
                "",
                "Generated: sdk",
                "Written (1):",
                "+ src/lib.rs",
                "",
                "Kept existing:",
                "= .gitignore",
            ]
        );
    }

    #[test]
    fn test_render_preview() {
        let report = report(GenerationResult::Preview(vec![PreviewFile {
            path: "src/lib.rs".into(),
            content: "pub mod api;".into(),
        }]));
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(out.lines[1], "-- src/lib.rs --");
        assert_eq!(out.lines[2], "pub mod api;");
        assert_eq!(out.lines.last().unwrap(), "1 files would be generated");
    }
}
