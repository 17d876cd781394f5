//! TypeScript class builder.

use sdkgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A method or constructor parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
    pub optional: bool,
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
            default: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Default value expression, e.g. `{}`.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn render(&self) -> String {
        let optional = if self.optional { "?" } else { "" };
        match &self.default {
            Some(default) => format!("{}{}: {} = {}", self.name, optional, self.ty, default),
            None => format!("{}{}: {}", self.name, optional, self.ty),
        }
    }
}

/// An instance property declaration.
#[derive(Debug, Clone)]
pub struct ClassField {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    modifiers: Vec<&'static str>,
}

impl ClassField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            modifiers: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn protected(mut self) -> Self {
        self.modifiers.push("protected");
        self
    }

    pub fn readonly(mut self) -> Self {
        self.modifiers.push("readonly");
        self
    }

    fn declaration(&self) -> String {
        let mut decl = String::new();
        for modifier in &self.modifiers {
            decl.push_str(modifier);
            decl.push(' ');
        }
        format!("{}{}: {};", decl, self.name, self.ty)
    }
}

/// A class method. A method named `constructor` renders without a return
/// type.
#[derive(Debug, Clone)]
pub struct Method {
    name: String,
    doc: Option<String>,
    modifiers: Vec<&'static str>,
    generics: Option<String>,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<String>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            modifiers: Vec::new(),
            generics: None,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn constructor() -> Self {
        Self::new("constructor")
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn protected(mut self) -> Self {
        self.modifiers.push("protected");
        self
    }

    pub fn static_(mut self) -> Self {
        self.modifiers.push("static");
        self
    }

    pub fn async_(mut self) -> Self {
        self.modifiers.push("async");
        self
    }

    /// Type parameters, without the angle brackets.
    pub fn generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    fn signature(&self) -> String {
        let mut sig = String::new();
        for modifier in &self.modifiers {
            sig.push_str(modifier);
            sig.push(' ');
        }
        sig.push_str(&self.name);
        if let Some(generics) = &self.generics {
            sig.push('<');
            sig.push_str(generics);
            sig.push('>');
        }
        sig.push('(');
        let params: Vec<String> = self.params.iter().map(Param::render).collect();
        sig.push_str(&params.join(", "));
        sig.push(')');
        if let Some(ret) = &self.return_type {
            sig.push_str(": ");
            sig.push_str(ret);
        }
        sig
    }
}

impl Renderable for Method {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut out = Vec::new();
        if let Some(doc) = &self.doc {
            out.push(CodeFragment::jsdoc(doc));
        }
        if self.body.is_empty() {
            out.push(CodeFragment::line(format!("{} {{}}", self.signature())));
        } else {
            let body = self
                .body
                .iter()
                .flat_map(|chunk| chunk.lines())
                .map(|line| {
                    if line.is_empty() {
                        CodeFragment::Blank
                    } else {
                        CodeFragment::line(line)
                    }
                })
                .collect();
            out.push(CodeFragment::block(
                format!("{} {{", self.signature()),
                body,
                "}",
            ));
        }
        out
    }
}

/// Builder for exported TypeScript classes.
#[derive(Debug, Clone)]
pub struct Class {
    name: String,
    doc: Option<String>,
    is_abstract: bool,
    extends: Option<String>,
    implements: Vec<String>,
    statics: Vec<String>,
    fields: Vec<ClassField>,
    methods: Vec<Method>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            is_abstract: false,
            extends: None,
            implements: Vec::new(),
            statics: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.extends = Some(base.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    /// Add a static member, written verbatim before the instance fields.
    pub fn static_member(mut self, line: impl Into<String>) -> Self {
        self.statics.push(line.into());
        self
    }

    pub fn field(mut self, field: ClassField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    fn header(&self) -> String {
        let keyword = if self.is_abstract { "abstract class" } else { "class" };
        let mut header = format!("export {} {}", keyword, self.name);
        if let Some(base) = &self.extends {
            header.push_str(" extends ");
            header.push_str(base);
        }
        if !self.implements.is_empty() {
            header.push_str(" implements ");
            header.push_str(&self.implements.join(", "));
        }
        header
    }

    /// Build the class as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Class {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut out = Vec::new();
        if let Some(doc) = &self.doc {
            out.push(CodeFragment::jsdoc(doc));
        }

        let mut sections: Vec<Vec<CodeFragment>> = Vec::new();
        if !self.statics.is_empty() {
            sections.push(self.statics.iter().map(CodeFragment::line).collect());
        }
        if !self.fields.is_empty() {
            let mut fields = Vec::new();
            for field in &self.fields {
                if let Some(doc) = &field.doc {
                    fields.push(CodeFragment::jsdoc(doc));
                }
                fields.push(CodeFragment::line(field.declaration()));
            }
            sections.push(fields);
        }
        sections.extend(self.methods.iter().map(Renderable::to_fragments));

        if sections.is_empty() {
            out.push(CodeFragment::line(format!("{} {{}}", self.header())));
            return out;
        }

        let mut body = Vec::new();
        for (i, section) in sections.into_iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::Blank);
            }
            body.extend(section);
        }
        out.push(CodeFragment::block(format!("{} {{", self.header()), body, "}"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_class() {
        assert_eq!(Class::new("Empty").build(), "export class Empty {}\n");
    }

    #[test]
    fn test_method_signature() {
        let method = Method::new("getProject")
            .async_()
            .param(Param::new("id", "number"))
            .param(Param::new("expand", "boolean | null").optional())
            .returns("Promise<unknown>");
        assert_eq!(
            method.signature(),
            "async getProject(id: number, expand?: boolean | null): Promise<unknown>"
        );
        assert_eq!(Method::constructor().signature(), "constructor()");

        let method = Method::new("requestModel")
            .protected()
            .async_()
            .generics("T")
            .param(Param::new("query", "Params").default_value("{}"))
            .returns("Promise<Response<T>>");
        assert_eq!(
            method.signature(),
            "protected async requestModel<T>(query: Params = {}): Promise<Response<T>>"
        );
    }

    #[test]
    fn test_abstract_class_with_readonly_field() {
        let code = Class::new("BaseApi")
            .abstract_()
            .field(ClassField::new("transport", "Transport").protected().readonly())
            .build();
        assert_eq!(
            code,
            "export abstract class BaseApi {\n  protected readonly transport: Transport;\n}\n"
        );
    }

    #[test]
    fn test_class_sections() {
        let code = Class::new("Tag")
            .extends("Model")
            .implements("TagFields")
            .static_member("static readonly NAME = \"Tag\";")
            .field(ClassField::new("label", "string").doc("Label"))
            .method(
                Method::constructor()
                    .param(Param::new("fields", "TagFields"))
                    .body_line("super();")
                    .body_line("this.label = fields.label;"),
            )
            .build();

        assert_eq!(
            code,
            "export class Tag extends Model implements TagFields {\n  \
             static readonly NAME = \"Tag\";\n\
             \n  \
             /** Label */\n  \
             label: string;\n\
             \n  \
             constructor(fields: TagFields) {\n    \
             super();\n    \
             this.label = fields.label;\n  \
             }\n\
             }\n"
        );
    }
}
