//! Check operation: synthesize without writing anything.

use sdkgen_codegen::{Diagnostic, Severity, synthesize};
use sdkgen_document::ApiSpec;

use crate::{ops::Settings, reports::CheckReport};

/// Execute the check operation.
pub fn check(spec: &ApiSpec, settings: &Settings) -> CheckReport {
    let output = synthesize(spec, settings.meta(spec));
    let ir = &output.ir;

    CheckReport {
        input: settings.input.display().to_string(),
        flavor: format!("{:?}", spec.flavor).to_lowercase(),
        schema_count: spec.schemas.len(),
        endpoint_count: spec.endpoints.len(),
        model_count: ir.models.len(),
        api_count: ir.apis.len(),
        errors: messages(&output.diagnostics, Severity::Error),
        warnings: messages(&output.diagnostics, Severity::Warning),
        infos: messages(&output.diagnostics, Severity::Info),
    }
}

fn messages(diagnostics: &[Diagnostic], severity: Severity) -> Vec<String> {
    diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .map(ToString::to_string)
        .collect()
}
