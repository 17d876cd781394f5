//! Schema-to-code synthesis.
//!
//! A [`GenerationSession`] owns the registry of emitted symbols for one run.
//! Schemas are synthesized first, in document order, then endpoints are
//! classified and grouped. Type resolution may recurse back into model
//! synthesis at any point; the registry makes that terminate.

mod api;
mod endpoint;
mod model;
mod resolve;
mod session;

pub use api::DEFAULT_GROUP;
pub use endpoint::operation_name;
use sdkgen_document::ApiSpec;
use sdkgen_ir::{SdkIR, SdkMeta};
pub use session::{GenerationSession, SchemaRegistry, SymbolKind};
use tracing::info;

use crate::Diagnostic;

/// Everything one synthesis run produces.
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    pub ir: SdkIR,
    pub diagnostics: Vec<Diagnostic>,
}

impl SynthesisOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }
}

/// Run the full synthesis over a loaded document.
pub fn synthesize(spec: &ApiSpec, meta: SdkMeta) -> SynthesisOutput {
    let mut session = GenerationSession::new(spec);
    session.synthesize_schemas();
    let apis = session.synthesize_apis();
    let (models, diagnostics) = session.finish();

    info!(
        models = models.len(),
        apis = apis.len(),
        diagnostics = diagnostics.len(),
        "synthesis complete"
    );

    SynthesisOutput {
        ir: SdkIR { meta, models, apis },
        diagnostics,
    }
}
