//! Schema definitions to generated models.

use std::collections::BTreeSet;

use sdkgen_document::{FieldSpec, ObjectSpec};
use sdkgen_ir::{EnumMember, EnumModel, EnumRepr, ModelDef, ModelField, StructModel, TypeNode};
use tracing::debug;

use super::session::{GenerationSession, SymbolKind};
use crate::UniqueNames;

impl<'s> GenerationSession<'s> {
    /// Synthesize every named schema in document order.
    ///
    /// Enum schemas become enums and object schemas become models. Other
    /// non-object schemas are left to be inlined wherever they are referenced.
    pub fn synthesize_schemas(&mut self) {
        let spec = self.spec;
        for (name, def) in &spec.schemas {
            match &def.alias {
                None => {
                    self.synthesize_model(name, def.description.clone(), &def.object);
                }
                Some(alias) if !alias.enum_values.is_empty() => {
                    self.synthesize_enum(name, def.description.clone(), alias);
                }
                Some(_) => debug!(schema = %name, "schema is inlined where referenced"),
            }
        }
    }

    /// Emit a model for `object` under `name`.
    ///
    /// If the name is already registered nothing is emitted and the type of
    /// the existing symbol is returned. The name is registered before any
    /// field is resolved, which is what ends reference cycles.
    pub fn synthesize_model(
        &mut self,
        name: &str,
        doc: Option<String>,
        object: &ObjectSpec,
    ) -> TypeNode {
        if !self.registry.register(name, SymbolKind::Struct) {
            return self.registered(name);
        }
        debug!(model = name, fields = object.properties.len(), "registered model");

        let required = object
            .properties
            .iter()
            .filter(|(field, _)| object.is_required(field));
        let optional = object
            .properties
            .iter()
            .filter(|(field, _)| !object.is_required(field));

        let mut fields = Vec::with_capacity(object.properties.len());
        for (field, spec) in required.chain(optional) {
            let ty = self.resolve_type(name, field, spec);
            fields.push(
                ModelField::new(field.clone(), ty, object.is_required(field))
                    .doc(spec.description.clone()),
            );
        }

        let mut dependencies = BTreeSet::new();
        for field in &fields {
            field.ty.collect_references(&mut dependencies);
        }
        dependencies.remove(name);

        self.models.push(ModelDef::Struct(StructModel {
            name: name.to_string(),
            doc: doc.filter(|d| !d.trim().is_empty()),
            fields,
            dependencies,
        }));
        TypeNode::model(name)
    }

    /// Emit an enum with one member per distinct value of `spec`.
    pub fn synthesize_enum(
        &mut self,
        name: &str,
        doc: Option<String>,
        spec: &FieldSpec,
    ) -> TypeNode {
        if !self.registry.register(name, SymbolKind::Enum) {
            return self.registered(name);
        }
        let values = &spec.enum_values;
        let repr = enum_repr(spec);
        debug!(model = name, members = values.len(), ?repr, "registered enum");

        let mut idents = UniqueNames::default();
        let mut members: Vec<EnumMember> = Vec::with_capacity(values.len());
        for value in values {
            if members.iter().any(|m| &m.value == value) {
                continue;
            }
            members.push(EnumMember {
                ident: idents.claim(&member_ident(value)),
                value: value.clone(),
            });
        }

        self.models.push(ModelDef::Enum(EnumModel {
            name: name.to_string(),
            doc: doc.filter(|d| !d.trim().is_empty()),
            members,
            repr,
        }));
        TypeNode::enumeration(name)
    }

    fn registered(&self, name: &str) -> TypeNode {
        self.symbol_type(name)
            .unwrap_or_else(|| TypeNode::model(name))
    }
}

/// Enums declared as integers whose values are all integers stay numbers on
/// the wire.
fn enum_repr(spec: &FieldSpec) -> EnumRepr {
    let declared = spec.type_name().trim().to_ascii_lowercase();
    let integral = matches!(declared.as_str(), "integer" | "int" | "long");
    if integral
        && !spec.enum_values.is_empty()
        && spec.enum_values.iter().all(|v| v.trim().parse::<i64>().is_ok())
    {
        EnumRepr::Integer
    } else {
        EnumRepr::String
    }
}

/// `in progress` -> `IN_PROGRESS`
fn member_ident(value: &str) -> String {
    value.to_uppercase().replace([' ', '-'], "_")
}
