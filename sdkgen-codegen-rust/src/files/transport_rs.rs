use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{Field, Fn, Impl, Param, RawCode, RustFile, Struct, Use};

/// The transport.rs file: the request value and the transport interface
/// users implement to send it.
pub struct TransportRs;

const TRANSPORT_TRAIT: &str = r#"/// Sends requests to the remote API.
///
/// Implementations own networking and authentication; the generated
/// operations only describe what to send.
pub trait Transport: Send + Sync {
    fn request(&self, request: Request) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn request(&self, request: Request) -> impl Future<Output = Result<Value, TransportError>> + Send {
        (**self).request(request)
    }
}"#;

const HELPERS: &str = r#"fn encode(name: &str, value: &impl Serialize) -> Result<Value, EncodeError> {
    serde_json::to_value(value).map_err(|source| EncodeError {
        name: name.to_string(),
        source,
    })
}

fn insert(map: &mut Map<String, Value>, name: &str, value: &impl Serialize) -> Result<(), EncodeError> {
    let value = encode(name, value)?;
    if !value.is_null() {
        map.insert(name.to_string(), value);
    }
    Ok(())
}"#;

impl TransportRs {
    fn encode_error(&self) -> Struct {
        Struct::new("EncodeError")
            .doc("A request argument could not be encoded as JSON.")
            .derive("Debug")
            .derive("thiserror::Error")
            .attr(r#"error("failed to encode parameter '{name}'")"#)
            .field(Field::new("name", "String"))
            .field(Field::new("source", "serde_json::Error").attr("source"))
    }

    fn transport_error(&self) -> Struct {
        Struct::new("TransportError")
            .doc("Failure reported by a [`Transport`].")
            .derive("Debug")
            .derive("thiserror::Error")
            .attr(r#"error("{message}")"#)
            .field(Field::new("message", "String"))
            .field(
                Field::new("source", "Option<Box<dyn std::error::Error + Send + Sync>>")
                    .attr("source"),
            )
    }

    fn transport_error_impl(&self) -> Impl {
        Impl::new("TransportError")
            .method(
                Fn::new("new")
                    .param(Param::new("message", "impl Into<String>"))
                    .returns("Self")
                    .body("Self {\n    message: message.into(),\n    source: None,\n}"),
            )
            .method(
                Fn::new("with_source")
                    .param(Param::new("message", "impl Into<String>"))
                    .param(Param::new(
                        "source",
                        "impl Into<Box<dyn std::error::Error + Send + Sync>>",
                    ))
                    .returns("Self")
                    .body("Self {\n    message: message.into(),\n    source: Some(source.into()),\n}"),
            )
    }

    fn request(&self) -> Struct {
        Struct::new("Request")
            .doc("One call to the remote API.\n\nArguments that encode to `null` are left out of every map.")
            .derive("Debug")
            .derive("Clone")
            .derive("PartialEq")
            .field(Field::new("method", "&'static str").doc("HTTP verb, e.g. `GET`."))
            .field(Field::new("path", "&'static str").doc("Path template with `{name}` placeholders."))
            .field(Field::new("path_params", "Map<String, Value>"))
            .field(Field::new("query", "Map<String, Value>"))
            .field(Field::new("body", "Map<String, Value>"))
    }

    fn map_setter(name: &str, map: &str, doc: &str) -> Fn {
        Fn::new(name)
            .doc(doc)
            .param(Param::receiver("mut self"))
            .param(Param::new("name", "&str"))
            .param(Param::new("value", "&impl Serialize"))
            .returns("Result<Self, EncodeError>")
            .body_line(format!("insert(&mut self.{}, name, value)?;", map))
            .body_line("Ok(self)")
    }

    fn request_impl(&self) -> Impl {
        Impl::new("Request")
            .method(
                Fn::new("new")
                    .param(Param::new("method", "&'static str"))
                    .param(Param::new("path", "&'static str"))
                    .returns("Self")
                    .body(
                        "Self {\n    method,\n    path,\n    path_params: Map::new(),\n    query: Map::new(),\n    body: Map::new(),\n}",
                    ),
            )
            .method(Self::map_setter(
                "path_param",
                "path_params",
                "Bind a `{name}` placeholder of the path template.",
            ))
            .method(Self::map_setter("query_param", "query", "Add a query-string argument."))
            .method(Self::map_setter("body_field", "body", "Add one entry of the body mapping."))
            .method(
                Fn::new("body")
                    .doc("Merge an aggregated body. Objects contribute their entries; any other value is stored under `name`.")
                    .param(Param::receiver("mut self"))
                    .param(Param::new("name", "&str"))
                    .param(Param::new("value", "&impl Serialize"))
                    .returns("Result<Self, EncodeError>")
                    .body(
                        "match encode(name, value)? {\n    Value::Null => {}\n    Value::Object(map) => self.body.extend(map),\n    other => {\n        self.body.insert(name.to_string(), other);\n    }\n}\nOk(self)",
                    ),
            )
    }
}

impl GeneratedFile for TransportRs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join("transport.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        RustFile::new()
            .use_group([Use::new("std").symbols(["future::Future", "sync::Arc"])])
            .use_group([
                Use::new("serde").symbol("Serialize"),
                Use::new("serde_json").symbols(["Map", "Value"]),
            ])
            .add(self.encode_error())
            .add(self.transport_error())
            .add(self.transport_error_impl())
            .add(self.request())
            .add(self.request_impl())
            .add(RawCode::new(TRANSPORT_TRAIT))
            .add(RawCode::new(HELPERS))
            .render()
    }
}
