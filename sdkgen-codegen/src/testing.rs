//! Test utilities for SDK backends.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{path::Path, process::Command};

use eyre::Result;
use sdkgen_document::ApiSpec;
use sdkgen_ir::{SdkIR, SdkMeta};

use crate::synthesize;

/// Error from compile checking.
#[derive(Debug)]
pub struct CompileError {
    pub message: String,
    pub output: String,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\nOutput:\n{}", self.message, self.output)
    }
}

impl std::error::Error for CompileError {}

/// Verifies that a generated SDK compiles or type-checks.
pub trait CompileChecker {
    /// Check the SDK in the given directory.
    fn check(&self, dir: &Path) -> Result<(), CompileError>;
}

/// Runs `cargo check` on a generated Rust crate.
pub struct RustChecker;

impl CompileChecker for RustChecker {
    fn check(&self, dir: &Path) -> Result<(), CompileError> {
        run_checker(Command::new("cargo").arg("check").current_dir(dir), "cargo check")
    }
}

/// Runs `cargo test` on a generated Rust crate, so tests placed in it
/// after generation exercise the emitted code.
pub struct RustTestRunner;

impl CompileChecker for RustTestRunner {
    fn check(&self, dir: &Path) -> Result<(), CompileError> {
        run_checker(Command::new("cargo").arg("test").current_dir(dir), "cargo test")
    }
}

/// Runs `tsc --noEmit` on a generated TypeScript package.
pub struct TypeScriptChecker;

impl CompileChecker for TypeScriptChecker {
    fn check(&self, dir: &Path) -> Result<(), CompileError> {
        run_checker(
            Command::new("npx").args(["tsc", "--noEmit"]).current_dir(dir),
            "tsc --noEmit",
        )
    }
}

fn run_checker(command: &mut Command, label: &str) -> Result<(), CompileError> {
    let output = command.output().map_err(|e| CompileError {
        message: format!("Failed to run {label}: {e}"),
        output: String::new(),
    })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        Err(CompileError {
            message: format!("{label} failed"),
            output: format!("stderr:\n{stderr}\n\nstdout:\n{stdout}"),
        })
    }
}

/// Package metadata used by backend tests.
pub fn test_meta() -> SdkMeta {
    SdkMeta {
        name: "demo-sdk".to_string(),
        version: "0.1.0".to_string(),
        description: Some("Demo SDK".to_string()),
    }
}

/// Parse a JSON document and synthesize it with [`test_meta`].
///
/// Panics on parse failure; intended for tests only.
pub fn ir_from_json(json: &str) -> SdkIR {
    let spec: ApiSpec = match sdkgen_document::parse_str(json) {
        Ok(spec) => spec,
        Err(e) => panic!("test document failed to parse: {e}"),
    };
    synthesize(&spec, test_meta()).ir
}

/// Generate code into a temporary directory and return it.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

/// Generate into a temporary directory and assert the result compiles.
pub fn assert_generates_valid_code<C>(checker: &C, generate: impl FnOnce(&Path) -> Result<()>)
where
    C: CompileChecker,
{
    let dir = match generate_to_temp(generate) {
        Ok(dir) => dir,
        Err(e) => panic!("generation failed: {e:?}"),
    };
    if let Err(e) = checker.check(dir.path()) {
        panic!("generated code does not compile:\n{e}");
    }
}
