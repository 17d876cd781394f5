//! Core operations.
//!
//! This module contains the business logic for sdkgen commands,
//! separated from CLI argument parsing and output rendering.

mod check;
mod generate;
mod settings;

pub use check::check;
pub use generate::{GenerateOptions, generate};
pub use settings::Settings;
