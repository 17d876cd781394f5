use std::path::Path;

use eyre::Result;
use sdkgen_codegen::{GenerateResult, LanguageCodegen, PreviewFile, UniqueNames};
use sdkgen_core::{GeneratedFile, WriteResult};
use sdkgen_ir::{ModelDef, SdkIR};
use tracing::{debug, info};

use crate::{
    TypeScriptTypeMapper,
    files::{
        ApiBaseTs, ApiTs, EnumTs, GitIgnore, IndexEntry, IndexTs, ModelBaseTs, ModelKind,
        ModelModules, ModelTs, PackageJson, TransportTs, TsConfig,
    },
    naming::TS_NAMING,
};

/// File stems the scaffolding already uses in every generated directory.
const RESERVED_STEMS: &[&str] = &["base", "index"];

/// TypeScript code generator that produces an ES module package.
pub struct Generator<'a> {
    ir: &'a SdkIR,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        self.preview_files()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        self.generate_files(output_dir)
    }
}

fn file_stems() -> UniqueNames {
    let mut names = UniqueNames::new("-");
    for reserved in RESERVED_STEMS {
        names.claim(reserved);
    }
    names
}

impl<'a> Generator<'a> {
    pub fn new(ir: &'a SdkIR) -> Self {
        Self { ir }
    }

    /// Every file of the generated package, in write order.
    fn files(&self) -> Vec<Box<dyn GeneratedFile + 'a>> {
        let ir = self.ir;
        let mut files: Vec<Box<dyn GeneratedFile + 'a>> = vec![
            Box::new(PackageJson::new(&ir.meta)),
            Box::new(TsConfig),
            Box::new(GitIgnore),
            Box::new(IndexTs::root()),
            Box::new(TransportTs),
            Box::new(ModelBaseTs),
        ];

        // Stems are assigned up front so models can import each other.
        let mut model_stems = file_stems();
        let mut modules = ModelModules::default();
        for model in &ir.models {
            let stem = model_stems.claim(&TS_NAMING.file_name(model.name()));
            let kind = match model {
                ModelDef::Struct(_) => ModelKind::Struct,
                ModelDef::Enum(_) => ModelKind::Enum,
            };
            modules.insert(model.name(), stem, kind);
        }

        let mapper = TypeScriptTypeMapper;
        let mut model_entries = Vec::new();
        for model in &ir.models {
            let Some((stem, _)) = modules.get(model.name()) else {
                continue;
            };
            let type_name = TS_NAMING.type_name(model.name());
            match model {
                ModelDef::Struct(s) => {
                    files.push(Box::new(ModelTs::new(s, stem, &modules)));
                    model_entries.push(
                        IndexEntry::value(stem, type_name).with_type(mapper.fields_name(&s.name)),
                    );
                }
                ModelDef::Enum(e) => {
                    files.push(Box::new(EnumTs::new(e, stem)));
                    model_entries.push(IndexEntry::value(stem, type_name));
                }
            }
        }
        files.push(Box::new(IndexTs::models(&model_entries)));

        let mut api_stems = file_stems();
        let mut api_entries = Vec::new();
        files.push(Box::new(ApiBaseTs));
        for api in &ir.apis {
            let stem = api_stems.claim(&TS_NAMING.file_name(&api.name));
            files.push(Box::new(ApiTs::new(api, &stem, &modules)));
            api_entries.push(IndexEntry::value(stem, TS_NAMING.type_name(&api.name)));
        }
        files.push(Box::new(IndexTs::api(&api_entries)));

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
            "generated typescript sdk"
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
