//! Snapshot tests for Rust code generation.
//!
//! These tests verify that the generated Rust code matches expected output.
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use sdkgen_codegen::testing::ir_from_json;
use sdkgen_codegen_rust::{Generator, LanguageCodegen};

const PROJECTS: &str = r#"{
  "groups": {
    "projects": [
      {
        "path": "/projects/id",
        "method": "GET",
        "description": "Get one project",
        "request_params": [
          {"name": "token", "type": "string", "required": true}
        ],
        "response_params": [
          {"name": "name", "type": "string", "required": true, "description": "Project name"},
          {"name": "budget", "type": "number"},
          {"name": "status", "type": "string", "description": "Project status", "enum": ["Open", "Closed"]},
          {"name": "owner", "type": "integer/string"}
        ]
      },
      {
        "path": "/projects",
        "method": "GET",
        "request_params": [
          {"name": "limit", "type": "integer", "description": "Page size"}
        ]
      }
    ]
  }
}"#;

/// Generate code from a document and return files sorted by path for deterministic snapshots.
fn generate_files(json: &str) -> Vec<(String, String)> {
    let ir = ir_from_json(json);
    let generator = Generator::new(&ir);
    let files = generator.preview();

    let mut result: Vec<(String, String)> =
        files.into_iter().map(|f| (f.path, f.content)).collect();
    result.sort_by(|a, b| a.0.cmp(&b.0));
    result
}

/// Get a specific file from the generated output.
fn get_file<'a>(files: &'a [(String, String)], path: &str) -> Option<&'a str> {
    files
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, c)| c.as_str())
}

#[test]
fn test_cargo_toml() {
    let files = generate_files(PROJECTS);
    let cargo_toml = get_file(&files, "Cargo.toml").expect("Cargo.toml not found");
    insta::assert_snapshot!("cargo_toml", cargo_toml);
}

#[test]
fn test_enum_model() {
    let files = generate_files(PROJECTS);
    let enum_rs = get_file(&files, "src/models/projects_id_response_status_enum.rs")
        .expect("enum file not found");
    insta::assert_snapshot!("enum_model", enum_rs);
}

#[test]
fn test_every_source_file_has_header() {
    let files = generate_files(PROJECTS);
    for (path, content) in &files {
        if path.ends_with(".rs") {
            assert!(
                content.starts_with("// Code generated by sdkgen. DO NOT EDIT.\n"),
                "{path} lacks the header"
            );
        }
    }
}

#[test]
fn test_response_model() {
    let files = generate_files(PROJECTS);
    let model = get_file(&files, "src/models/projects_id_response.rs").expect("model not found");

    assert!(model.contains(
        "use super::{ProjectsIdResponseOwnerUnion, ProjectsIdResponseStatusEnum};"
    ));
    assert!(model.contains("pub struct ProjectsIdResponse {"));
    assert!(model.contains("    /// Project name\n    pub name: String,\n"));
    assert!(model.contains("    pub budget: Option<f64>,\n"));
    assert!(model.contains("    pub status: Option<ProjectsIdResponseStatusEnum>,\n"));
    assert!(model.contains("    pub owner: Option<ProjectsIdResponseOwnerUnion>,\n"));
    assert!(model.contains("pub fn new(name: String) -> Self {"));
    assert!(model.contains("const REQUIRED: &'static [&'static str] = &[\"name\"];"));
}

#[test]
fn test_union_model() {
    let files = generate_files(PROJECTS);
    let union = get_file(&files, "src/models/projects_id_response_owner_union.rs")
        .expect("union not found");

    assert!(union.contains("#[serde(untagged)]"));
    assert!(union.contains("    Int(i64),\n    String(String),\n"));
}

#[test]
fn test_models_mod_exports_every_type() {
    let files = generate_files(PROJECTS);
    let models = get_file(&files, "src/models/mod.rs").expect("models/mod.rs not found");

    assert!(models.contains("pub mod base;"));
    assert!(models.contains("pub use projects_id_response::ProjectsIdResponse;"));
    assert!(models.contains(
        "pub use projects_id_response_status_enum::ProjectsIdResponseStatusEnum;"
    ));
    assert!(models.contains(
        "pub use projects_id_response_owner_union::ProjectsIdResponseOwnerUnion;"
    ));
}

#[test]
fn test_api_class() {
    let files = generate_files(PROJECTS);
    let api = get_file(&files, "src/api/projects_api.rs").expect("api not found");

    assert!(api.contains("pub struct ProjectsApi<T> {"));
    assert!(api.contains(
        "pub async fn get_projects_id(&self, id: i64) -> Result<Response<models::ProjectsIdResponse>, ApiError> {"
    ));
    assert!(api.contains("Request::new(\"GET\", \"/projects/{id}\")"));
    assert!(api.contains(
        "pub async fn projects(&self, limit: Option<i64>) -> Result<serde_json::Value, ApiError> {"
    ));
    assert!(api.contains(".query_param(\"limit\", &limit)?;"));
    assert!(api.contains("/// * `limit` - Page size"));
    assert!(!api.to_lowercase().contains("token"));
}

#[test]
fn test_generation_is_deterministic() {
    assert_eq!(generate_files(PROJECTS), generate_files(PROJECTS));
}

/// Every file below `dir`, keyed by relative path.
fn read_tree(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let relative = path.strip_prefix(root).unwrap().to_path_buf();
                out.insert(relative, fs::read(&path).unwrap());
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(dir, dir, &mut out);
    out
}

#[test]
fn test_written_files_are_byte_identical_across_runs() {
    let first = tempfile::TempDir::new().unwrap();
    let second = tempfile::TempDir::new().unwrap();
    Generator::new(&ir_from_json(PROJECTS)).generate(first.path()).unwrap();
    Generator::new(&ir_from_json(PROJECTS)).generate(second.path()).unwrap();

    let first = read_tree(first.path());
    let second = read_tree(second.path());
    assert!(first.contains_key(Path::new("src/models/projects_id_response.rs")));
    assert_eq!(
        first.keys().collect::<Vec<_>>(),
        second.keys().collect::<Vec<_>>()
    );
    for (path, bytes) in &first {
        assert_eq!(Some(bytes), second.get(path), "{} differs", path.display());
    }
}

#[test]
fn test_models_wire_map_conversion_and_required_check() {
    let files = generate_files(PROJECTS);
    let base = get_file(&files, "src/models/base.rs").expect("models/base.rs not found");
    let model = get_file(&files, "src/models/projects_id_response.rs").expect("model not found");
    let models = get_file(&files, "src/models/mod.rs").expect("models/mod.rs not found");

    assert!(base.contains("fn to_map(&self) -> Result<Map<String, Value>, ModelError> {"));
    assert!(base.contains("        match serde_json::to_value(self) {"));
    assert!(base.contains("fn from_map(map: Map<String, Value>) -> Result<Self, ModelError> {"));
    assert!(base.contains("        for &field in Self::REQUIRED {"));
    assert!(base.contains("            if map.get(field).is_none_or(Value::is_null) {"));
    assert!(base.contains("                return Err(ModelError::MissingField {"));
    assert!(base.contains("        serde_json::from_value(Value::Object(map))"));

    assert!(model.contains("impl super::base::Model for ProjectsIdResponse {"));
    assert!(model.contains("    const NAME: &'static str = \"ProjectsIdResponse\";"));
    assert!(model.contains(
        "    #[serde(default, skip_serializing_if = \"Option::is_none\")]\n    pub budget: Option<f64>,\n"
    ));
    assert!(models.contains("pub mod base;"));
}

#[test]
fn test_generate_writes_and_keeps_gitignore() {
    let ir = ir_from_json(PROJECTS);
    let generator = Generator::new(&ir);
    let dir = tempfile::TempDir::new().unwrap();

    let first = generator.generate(dir.path()).unwrap();
    assert!(first.written.contains(&".gitignore".to_string()));
    assert!(first.skipped.is_empty());
    assert!(dir.path().join("src/api/projects_api.rs").exists());

    let second = generator.generate(dir.path()).unwrap();
    assert_eq!(second.skipped, vec![".gitignore".to_string()]);
    assert_eq!(second.written.len(), first.written.len() - 1);
}
