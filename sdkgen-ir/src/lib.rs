//! Intermediate representation types for the sdkgen client generator.
//!
//! This crate holds the language-agnostic description of a generated SDK.
//! The synthesis engine in `sdkgen-codegen` produces it; every language
//! backend renders from it.
//!
//! # Architecture
//!
//! ```text
//! api document → sdkgen-document (parsing) → sdkgen-codegen (synthesis) → sdkgen-ir → backends
//! ```
//!
//! The IR types are designed to be:
//! - Language-agnostic (no Rust/TypeScript-specific concerns)
//! - Deterministic (ordered collections only)
//! - Serializable, so a run can be inspected as JSON

mod api;
mod model;
mod operation;
mod types;

pub use api::{ApiClass, SdkIR, SdkMeta};
pub use model::{EnumMember, EnumModel, EnumRepr, ModelDef, ModelField, StructModel};
pub use operation::{HttpMethod, Operation, OperationParam, ParamLocation, ResponseType};
pub use types::{Primitive, TypeNode};
