//! Rust-specific naming conventions.

use sdkgen_codegen::{NamingConvention, UniqueNames};
use sdkgen_core::{to_pascal_case, to_snake_case};

/// Keywords that cannot be raw identifiers get a trailing underscore.
fn escape_rust_reserved(name: &str) -> String {
    match name {
        "self" | "Self" | "crate" | "super" => format!("{}_", name),
        _ => format!("r#{}", name),
    }
}

/// Rust naming conventions.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    to_type: to_pascal_case,
    to_file: to_snake_case,
    to_field: to_snake_case,
    to_method: to_snake_case,
    reserved_words: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
        "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
        "gen",
    ],
    escape_reserved: escape_rust_reserved,
};

/// A field or parameter identifier. Names that snake_case to nothing
/// become `field`.
pub fn field_ident(wire_name: &str) -> String {
    match RUST_NAMING.field_name(wire_name).as_str() {
        "_" => "field".to_string(),
        name => name.to_string(),
    }
}

/// A module name, and the file stem that backs it.
pub fn module_ident(type_name: &str) -> (String, String) {
    let module = RUST_NAMING.safe_name(&RUST_NAMING.file_name(type_name));
    let stem = module.trim_start_matches("r#").to_string();
    (module, stem)
}

/// Identifier without any raw prefix, as serde sees it.
pub fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// Claim `ident` in `names`, comparing without the raw prefix. A suffixed
/// result is never a keyword, so it is returned bare.
pub fn claim_ident(names: &mut UniqueNames, ident: &str) -> String {
    let bare = unraw(ident);
    let claimed = names.claim(bare);
    if claimed == bare {
        ident.to_string()
    } else {
        claimed
    }
}

/// A Rust string literal for `value`.
pub fn string_literal(value: &str) -> String {
    format!("{:?}", value)
}
