//! Per-run generation state.

use indexmap::{IndexMap, IndexSet};
use sdkgen_document::{ApiSpec, SchemaDefinition};
use sdkgen_ir::{ModelDef, TypeNode};

use crate::Diagnostic;

/// What kind of symbol a registered name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Struct,
    Enum,
    Union,
}

/// Named schema definitions plus the append-only table of symbol names
/// already emitted.
///
/// A name is registered *before* its fields are resolved, so a reference
/// cycle finds the name on the way back and stops.
#[derive(Debug)]
pub struct SchemaRegistry<'s> {
    schemas: &'s IndexMap<String, SchemaDefinition>,
    emitted: IndexMap<String, SymbolKind>,
}

impl<'s> SchemaRegistry<'s> {
    pub fn new(schemas: &'s IndexMap<String, SchemaDefinition>) -> Self {
        Self {
            schemas,
            emitted: IndexMap::new(),
        }
    }

    /// Look up a schema definition by name.
    pub fn definition(&self, name: &str) -> Option<&'s SchemaDefinition> {
        self.schemas.get(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.emitted.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<SymbolKind> {
        self.emitted.get(name).copied()
    }

    /// Register `name`. Returns `false` if it was already taken; the first
    /// registration wins.
    pub fn register(&mut self, name: &str, kind: SymbolKind) -> bool {
        if self.emitted.contains_key(name) {
            return false;
        }
        self.emitted.insert(name.to_string(), kind);
        true
    }

    /// `name` if it is free, otherwise the first of `name2`, `name3`, ...
    /// that is. Names of schema definitions count as taken even before
    /// they are registered.
    pub fn unique_name(&self, name: &str) -> String {
        let taken = |candidate: &str| {
            self.is_registered(candidate) || self.definition(candidate).is_some()
        };
        if !taken(name) {
            return name.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{name}{n}");
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Registered names in registration order.
    pub fn emitted(&self) -> impl Iterator<Item = &str> {
        self.emitted.keys().map(String::as_str)
    }
}

/// State for one generation run, passed by mutable reference through every
/// resolution and synthesis step.
#[derive(Debug)]
pub struct GenerationSession<'s> {
    pub(crate) spec: &'s ApiSpec,
    pub(crate) registry: SchemaRegistry<'s>,
    pub(crate) models: Vec<ModelDef>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Resolved types of non-object schemas, filled on first use.
    pub(crate) aliases: IndexMap<String, TypeNode>,
    /// Non-object schemas currently being resolved.
    pub(crate) alias_stack: IndexSet<String>,
}

impl<'s> GenerationSession<'s> {
    pub fn new(spec: &'s ApiSpec) -> Self {
        Self {
            spec,
            registry: SchemaRegistry::new(&spec.schemas),
            models: Vec::new(),
            diagnostics: Vec::new(),
            aliases: IndexMap::new(),
            alias_stack: IndexSet::new(),
        }
    }

    pub fn spec(&self) -> &'s ApiSpec {
        self.spec
    }

    pub fn registry(&self) -> &SchemaRegistry<'s> {
        &self.registry
    }

    /// Models emitted so far, nested models before the models using them.
    pub fn models(&self) -> &[ModelDef] {
        &self.models
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Consume the session, returning emitted models and diagnostics.
    pub fn finish(self) -> (Vec<ModelDef>, Vec<Diagnostic>) {
        (self.models, self.diagnostics)
    }
}
