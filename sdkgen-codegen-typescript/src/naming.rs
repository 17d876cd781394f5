//! TypeScript-specific naming conventions.

use sdkgen_codegen::NamingConvention;
use sdkgen_core::{to_camel_case, to_kebab_case, to_pascal_case};

fn escape_ts_reserved(name: &str) -> String {
    format!("_{}", name)
}

/// TypeScript naming conventions.
pub const TS_NAMING: NamingConvention = NamingConvention {
    // Types use PascalCase
    to_type: to_pascal_case,
    // Files use kebab-case
    to_file: to_kebab_case,
    // Fields, parameters and methods use camelCase
    to_field: to_camel_case,
    to_method: to_camel_case,
    reserved_words: &[
        // JavaScript reserved words
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
        "import", "in", "instanceof", "let", "new", "null", "return", "super", "switch", "this",
        "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
        // Strict mode and TypeScript reserved words
        "arguments", "eval", "implements", "interface", "package", "private", "protected",
        "public", "static", "await",
    ],
    escape_reserved: escape_ts_reserved,
};

/// Whether `name` can be written as a bare property name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// A property key: bare when possible, otherwise a string literal.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Property access on `target`, e.g. `fields.name` or `fields["user-id"]`.
pub fn property_access(target: &str, name: &str) -> String {
    if is_identifier(name) {
        format!("{}.{}", target, name)
    } else {
        format!("{}[{}]", target, string_literal(name))
    }
}

/// A double-quoted string literal. JSON escaping is valid TypeScript.
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ts_naming_type() {
        assert_eq!(TS_NAMING.type_name("projects_api"), "ProjectsApi");
        assert_eq!(TS_NAMING.type_name("ProjectsIdResponse"), "ProjectsIdResponse");
    }

    #[test]
    fn test_ts_naming_file() {
        assert_eq!(TS_NAMING.file_name("ProjectsIdResponse"), "projects-id-response");
        assert_eq!(TS_NAMING.file_name("ProjectsApi"), "projects-api");
    }

    #[test]
    fn test_ts_naming_method() {
        assert_eq!(TS_NAMING.method_name("get_projects_id"), "getProjectsId");
        assert_eq!(TS_NAMING.field_name("user-id"), "userId");
        assert_eq!(TS_NAMING.safe_name("delete"), "_delete");
        assert_eq!(TS_NAMING.safe_name("hello"), "hello");
    }

    #[test]
    fn test_property_keys() {
        assert_eq!(property_key("userId"), "userId");
        assert_eq!(property_key("user-id"), "\"user-id\"");
        assert_eq!(property_key("2fa"), "\"2fa\"");
        assert_eq!(property_access("fields", "name"), "fields.name");
        assert_eq!(property_access("this", "user-id"), "this[\"user-id\"]");
    }
}
