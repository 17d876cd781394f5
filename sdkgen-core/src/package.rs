//! Package metadata normalization shared by the manifest writers.

use crate::to_kebab_case;

const DEFAULT_NAME: &str = "sdk";
const DEFAULT_VERSION: &str = "0.1.0";

/// Package names are lower kebab-case and may not start with a digit.
/// Both Cargo and npm accept the result.
pub fn package_name(name: &str) -> String {
    let name = to_kebab_case(name);
    match name.chars().next() {
        None => DEFAULT_NAME.to_string(),
        Some(c) if c.is_ascii_digit() => format!("{}-{}", DEFAULT_NAME, name),
        Some(_) => name,
    }
}

/// Normalize to `MAJOR.MINOR.PATCH`; short versions are padded and
/// anything unparseable falls back to `0.1.0`.
pub fn semver(version: &str) -> String {
    let version = version.trim().trim_start_matches('v');
    let (core, suffix) = match version.find(['-', '+']) {
        Some(at) => version.split_at(at),
        None => (version, ""),
    };

    let mut parts: Vec<&str> = core.split('.').collect();
    let numeric = parts
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
    if !numeric || parts.len() > 3 {
        return DEFAULT_VERSION.to_string();
    }
    while parts.len() < 3 {
        parts.push("0");
    }
    format!("{}{}", parts.join("."), suffix)
}
