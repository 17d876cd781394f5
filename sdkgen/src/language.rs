//! Unified language dispatch.

use sdkgen_codegen::LanguageCodegen;
use sdkgen_codegen_rust::Generator as RustGenerator;
use sdkgen_codegen_typescript::Generator as TypeScriptGenerator;
use sdkgen_ir::SdkIR;

use crate::config::Language;

/// Create the backend for `language` over a synthesized SDK.
pub fn generator(language: Language, ir: &SdkIR) -> Box<dyn LanguageCodegen + '_> {
    match language {
        Language::Rust => Box::new(RustGenerator::new(ir)),
        Language::TypeScript => Box::new(TypeScriptGenerator::new(ir)),
    }
}
