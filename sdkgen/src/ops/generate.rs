//! Generate operation: synthesize the document and render it.

use std::path::Path;

use eyre::{Result, WrapErr};
use sdkgen_codegen::synthesize;
use sdkgen_document::ApiSpec;
use tracing::info;

use crate::{
    config::Language,
    language,
    ops::Settings,
    reports::{GenerateReport, GenerationResult, PreviewFile, WrittenResult},
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    pub output_dir: &'a Path,
    pub language: Language,
    /// Preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
pub fn generate(spec: &ApiSpec, settings: &Settings, opts: GenerateOptions) -> Result<GenerateReport> {
    let output = synthesize(spec, settings.meta(spec));
    let ir = &output.ir;
    info!(language = %opts.language, models = ir.models.len(), apis = ir.apis.len(), "rendering sdk");

    let generator = language::generator(opts.language, ir);
    let result = if opts.dry_run {
        let files = generator
            .preview()
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(files)
    } else {
        let written = generator
            .generate(opts.output_dir)
            .wrap_err("Failed to generate code")?;
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            written: written.written,
            skipped: written.skipped,
        })
    };

    Ok(GenerateReport {
        name: ir.meta.name.clone(),
        version: ir.meta.version.clone(),
        language: opts.language,
        diagnostics: output.diagnostics.iter().map(ToString::to_string).collect(),
        model_count: ir.models.len(),
        api_count: ir.apis.len(),
        operation_count: ir.apis.iter().map(|a| a.operations.len()).sum(),
        result,
    })
}
