//! Check command report data structures.

use super::output::{Output, Report};

/// Report data from validating a document.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the checked document.
    pub input: String,
    /// `legacy` or `openapi`.
    pub flavor: String,
    pub schema_count: usize,
    pub endpoint_count: usize,
    pub model_count: usize,
    pub api_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for message in self.errors.iter().chain(&self.warnings) {
            out.diagnostic(message);
        }
        for info in &self.infos {
            out.preformatted(info);
        }
        if !self.errors.is_empty() || !self.warnings.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            out.preformatted(&format!(
                "✗ {} has {} error(s)",
                self.input,
                self.errors.len()
            ));
            return;
        }

        out.preformatted(&format!("✓ {} is valid ({})", self.input, self.flavor));
        out.newline();
        out.key_value("Schemas", &self.schema_count.to_string());
        out.key_value("Endpoints", &self.endpoint_count.to_string());
        out.key_value("Models", &self.model_count.to_string());
        out.key_value("API groups", &self.api_count.to_string());
    }
}
