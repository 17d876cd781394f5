//! Naming conventions for target languages.

use std::collections::HashSet;

/// Language-specific naming conventions.
///
/// Defines how document names become type, file, field and method names,
/// and how reserved words are escaped.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Schema or group name to type name (e.g., "project_detail" -> "ProjectDetail")
    pub to_type: fn(&str) -> String,
    /// Symbol name to file name (e.g., "ProjectDetail" -> "project_detail")
    pub to_file: fn(&str) -> String,
    /// Wire field name to field/property name
    pub to_field: fn(&str) -> String,
    /// Operation name to method name
    pub to_method: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "r#type" in Rust)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Make `name` usable as an identifier: empty names become `_`, a
    /// leading digit gets a `_` prefix, reserved words are escaped.
    pub fn safe_name(&self, name: &str) -> String {
        if name.is_empty() {
            return "_".to_string();
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return format!("_{name}");
        }
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    pub fn type_name(&self, name: &str) -> String {
        self.safe_name(&(self.to_type)(name))
    }

    /// File names are never escaped.
    pub fn file_name(&self, name: &str) -> String {
        (self.to_file)(name)
    }

    pub fn field_name(&self, name: &str) -> String {
        self.safe_name(&(self.to_field)(name))
    }

    pub fn method_name(&self, name: &str) -> String {
        self.safe_name(&(self.to_method)(name))
    }
}

/// Hands out names that are unique within one scope by appending a numeric
/// suffix (`name`, `name_2`, `name_3`, ...).
#[derive(Debug, Clone)]
pub struct UniqueNames {
    taken: HashSet<String>,
    separator: &'static str,
}

impl UniqueNames {
    pub fn new(separator: &'static str) -> Self {
        Self {
            taken: HashSet::new(),
            separator,
        }
    }

    /// Claim `name`, or the first free suffixed variant of it.
    pub fn claim(&mut self, name: &str) -> String {
        if self.taken.insert(name.to_string()) {
            return name.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{name}{}{n}", self.separator);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Default for UniqueNames {
    fn default() -> Self {
        Self::new("_")
    }
}
