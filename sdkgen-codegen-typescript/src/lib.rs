//! TypeScript SDK generator for sdkgen.
//!
//! Renders a synthesized [`SdkIR`](sdkgen_ir::SdkIR) as an ES module
//! package: model classes with `toMap`/`fromMap` conversion, one API class
//! per group, and a `Transport` interface the user implements for
//! networking. Sources use `.ts` import specifiers and type-check with
//! `tsc --noEmit`.
//!
//! # Generated Output
//!
//! - `src/transport.ts` - request description and transport contract
//! - `src/models/*.ts` - one module per model or enum, plus `base.ts`
//! - `src/api/*.ts` - one module per API class, plus `base.ts`
//! - `src/index.ts` - package entry point
//! - `package.json`, `tsconfig.json`, `.gitignore`

mod ast;
mod code_file;
pub mod files;
mod generator;
mod naming;
mod type_mapper;

pub use ast::{Class, ClassField, Export, Import, Interface, InterfaceField, Method, Param};
pub use code_file::{CodeFile, RawCode};
pub use generator::Generator;
pub use naming::TS_NAMING;
pub use sdkgen_codegen::LanguageCodegen;
pub use type_mapper::TypeScriptTypeMapper;
