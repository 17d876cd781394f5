use std::path::Path;

use eyre::Result;
use sdkgen_codegen::{GenerateResult, LanguageCodegen, PreviewFile, UniqueNames};
use sdkgen_core::{GeneratedFile, WriteResult};
use sdkgen_ir::{ModelDef, SdkIR};
use tracing::{debug, info};

use crate::{
    boxing::Recursion,
    files::{
        ApiBase, ApiRs, CargoToml, EnumRs, GitIgnore, LibRs, ModRs, ModelBase, ModuleExport,
        StructRs, TransportRs, UnionRs,
    },
    naming::{RUST_NAMING, claim_ident, module_ident, unraw},
};

/// Module names the scaffolding already uses in every generated directory.
const RESERVED_MODULES: &[&str] = &["base", "mod"];

/// Rust code generator that produces a serde-based client crate.
pub struct Generator<'a> {
    ir: &'a SdkIR,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        self.preview_files()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        self.generate_files(output_dir)
    }
}

fn module_names() -> UniqueNames {
    let mut names = UniqueNames::default();
    for reserved in RESERVED_MODULES {
        names.claim(reserved);
    }
    names
}

/// Module identifier and file stem for `type_name`, unique within `names`.
fn claim_module(names: &mut UniqueNames, type_name: &str) -> (String, String) {
    let (module, _) = module_ident(type_name);
    let module = claim_ident(names, &module);
    let stem = unraw(&module).to_string();
    (module, stem)
}

impl<'a> Generator<'a> {
    pub fn new(ir: &'a SdkIR) -> Self {
        Self { ir }
    }

    /// Every file of the generated crate, in write order.
    fn files(&self) -> Vec<Box<dyn GeneratedFile + 'a>> {
        let ir = self.ir;
        let recursion = Recursion::new(ir);
        let mut files: Vec<Box<dyn GeneratedFile + 'a>> = vec![
            Box::new(CargoToml::new(&ir.meta).with_temporal(ir.uses_temporal())),
            Box::new(GitIgnore),
            Box::new(LibRs::new(&ir.meta)),
            Box::new(TransportRs),
            Box::new(ModelBase),
        ];

        let mut model_names = module_names();
        let mut model_exports = Vec::new();
        for model in &ir.models {
            let (module, stem) = claim_module(&mut model_names, model.name());
            let file: Box<dyn GeneratedFile + 'a> = match model {
                ModelDef::Struct(s) => Box::new(StructRs::new(s, stem, &recursion)),
                ModelDef::Enum(e) => Box::new(EnumRs::new(e, stem)),
            };
            files.push(file);
            model_exports.push(ModuleExport {
                module,
                type_name: RUST_NAMING.type_name(model.name()),
            });
        }
        for (name, members) in ir.unions() {
            let (module, stem) = claim_module(&mut model_names, name);
            files.push(Box::new(UnionRs::new(name, members, stem, &recursion)));
            model_exports.push(ModuleExport {
                module,
                type_name: RUST_NAMING.type_name(name),
            });
        }
        files.push(Box::new(ModRs::models(model_exports)));

        let mut api_names = module_names();
        let mut api_exports = Vec::new();
        files.push(Box::new(ApiBase));
        for api in &ir.apis {
            let (module, stem) = claim_module(&mut api_names, &api.name);
            files.push(Box::new(ApiRs::new(api, stem)));
            api_exports.push(ModuleExport {
                module,
                type_name: RUST_NAMING.type_name(&api.name),
            });
        }
        files.push(Box::new(ModRs::api(api_exports)));

        files
    }

    /// Preview generated files without writing to disk
    fn preview_files(&self) -> Vec<PreviewFile> {
        self.files()
            .iter()
            .map(|file| PreviewFile {
                path: relative_path(file.as_ref()),
                content: file.contents(),
            })
            .collect()
    }

    /// Generate all files into the specified output directory
    fn generate_files(&self, output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();

        for file in self.files() {
            let path = relative_path(file.as_ref());
            match file.write(output_dir)? {
                WriteResult::Written => result.written.push(path),
                WriteResult::Skipped => {
                    debug!(path = %path, "kept existing file");
                    result.skipped.push(path);
                }
            }
        }

        info!(
            output = %output_dir.display(),
            written = result.written.len(),
            skipped = result.skipped.len(),
            "generated rust sdk"
        );
        Ok(result)
    }
}

/// Path of `file` relative to the output directory, `/`-separated.
fn relative_path(file: &dyn GeneratedFile) -> String {
    file.path(Path::new(""))
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
