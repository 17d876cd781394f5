use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use sdkgen_codegen::UniqueNames;
use sdkgen_core::{FileRules, GeneratedFile};
use sdkgen_ir::StructModel;

use super::{GENERATED_HEADER, referenced_types};
use crate::{
    Field, Fn, Impl, Param, RustFile, RustTypeMapper, Struct, Use,
    boxing::Recursion,
    naming::{RUST_NAMING, claim_ident, field_ident, string_literal, unraw},
};

/// Clippy's default argument limit for constructors.
const MAX_ARGS: usize = 7;

struct FieldPlan<'a> {
    ident: String,
    wire: &'a str,
    ty: String,
    required: bool,
    doc: Option<&'a str>,
}

/// One models/<name>.rs file holding a struct and its `Model` impl.
pub struct StructRs<'a> {
    model: &'a StructModel,
    stem: String,
    fields: Vec<FieldPlan<'a>>,
}

impl<'a> StructRs<'a> {
    pub fn new(model: &'a StructModel, stem: impl Into<String>, recursion: &Recursion) -> Self {
        let mapper = RustTypeMapper::new();
        let boxed = |to: &str| recursion.needs_box(&model.name, to);
        let mut names = UniqueNames::default();

        let fields = model
            .fields
            .iter()
            .map(|field| FieldPlan {
                ident: claim_ident(&mut names, &field_ident(&field.name)),
                wire: &field.name,
                ty: mapper.render_field(&field.ty, &boxed),
                required: field.required,
                doc: field.doc.as_deref(),
            })
            .collect();

        Self {
            model,
            stem: stem.into(),
            fields,
        }
    }

    fn type_name(&self) -> String {
        RUST_NAMING.type_name(&self.model.name)
    }

    fn imports(&self) -> Option<Use> {
        let mut names = BTreeSet::new();
        for field in &self.model.fields {
            referenced_types(&field.ty, &mut names);
        }
        names.remove(&self.model.name);

        let symbols: Vec<String> = names.iter().map(|n| RUST_NAMING.type_name(n)).collect();
        (!symbols.is_empty()).then(|| Use::new("super").symbols(symbols))
    }

    fn definition(&self) -> Struct {
        let mut def = Struct::new(self.type_name())
            .derive("Debug")
            .derive("Clone")
            .derive("PartialEq")
            .derive("serde::Serialize")
            .derive("serde::Deserialize");
        if let Some(doc) = &self.model.doc {
            def = def.doc(doc);
        }

        for plan in &self.fields {
            let mut field = Field::new(&plan.ident, &plan.ty);
            if let Some(doc) = plan.doc {
                field = field.doc(doc);
            }
            if unraw(&plan.ident) != plan.wire {
                field = field.attr(format!("serde(rename = {})", string_literal(plan.wire)));
            }
            if !plan.required {
                field = field.attr(r#"serde(default, skip_serializing_if = "Option::is_none")"#);
            }
            def = def.field(field);
        }
        def
    }

    fn constructor(&self) -> Impl {
        let required: Vec<&FieldPlan<'_>> = self.fields.iter().filter(|f| f.required).collect();

        let mut new = Fn::new("new")
            .doc("Build a value from its required fields; optional fields start empty.")
            .returns("Self");
        if required.len() > MAX_ARGS {
            new = new.attr("allow(clippy::too_many_arguments)");
        }
        for plan in &required {
            new = new.param(Param::new(&plan.ident, &plan.ty));
        }

        if self.fields.is_empty() {
            new = new.body_line("Self {}");
        } else {
            new = new.body_line("Self {");
            for plan in &self.fields {
                new = new.body_line(if plan.required {
                    format!("    {},", plan.ident)
                } else {
                    format!("    {}: None,", plan.ident)
                });
            }
            new = new.body_line("}");
        }

        Impl::new(self.type_name()).method(new)
    }

    fn model_impl(&self) -> Impl {
        let required: Vec<String> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| string_literal(f.wire))
            .collect();

        Impl::new(self.type_name())
            .for_trait("super::base::Model")
            .item(format!(
                "const NAME: &'static str = {};",
                string_literal(&self.model.name)
            ))
            .item(format!(
                "const REQUIRED: &'static [&'static str] = &[{}];",
                required.join(", ")
            ))
    }
}

impl GeneratedFile for StructRs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src")
            .join("models")
            .join(format!("{}.rs", self.stem))
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        RustFile::new()
            .use_group(self.imports())
            .add(self.definition())
            .add(self.constructor())
            .add(self.model_impl())
            .render()
    }
}
