use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{Enum, Field, Fn, Impl, Param, RustFile, Struct, Use, Variant};

/// The api/base.rs file: the error type, the response wrapper and the
/// transport holder with the generic dispatch methods.
pub struct ApiBase;

impl ApiBase {
    fn api_error(&self) -> Enum {
        Enum::new("ApiError")
            .doc("Error returned by every generated operation.")
            .derive("Debug")
            .derive("thiserror::Error")
            .variant(
                Variant::new("Transport")
                    .attr("error(transparent)")
                    .tuple("#[from] TransportError"),
            )
            .variant(
                Variant::new("Model")
                    .attr("error(transparent)")
                    .tuple("#[from] ModelError"),
            )
            .variant(
                Variant::new("Encode")
                    .attr("error(transparent)")
                    .tuple("#[from] EncodeError"),
            )
    }

    fn response(&self) -> Enum {
        Enum::new("Response<T>")
            .doc("Result of an operation with a response model: the parsed model when the\nAPI answered with an object, otherwise the raw value.")
            .derive("Debug")
            .derive("Clone")
            .derive("PartialEq")
            .variant(Variant::new("Parsed").tuple("T"))
            .variant(Variant::new("Raw").tuple("Value"))
    }

    fn response_impl(&self) -> Impl {
        Impl::new("Response<T>").generics("T").method(
            Fn::new("parsed")
                .doc("The parsed model, if there is one.")
                .param(Param::receiver("self"))
                .returns("Option<T>")
                .body("match self {\n    Self::Parsed(model) => Some(model),\n    Self::Raw(_) => None,\n}"),
        )
    }

    fn base_api(&self) -> Struct {
        Struct::new("BaseApi")
            .generics("T")
            .doc("Holds the transport shared by the operations of one API class.")
            .derive("Debug")
            .derive("Clone")
            .field(Field::new("transport", "T").private())
    }

    fn base_api_impl(&self) -> Impl {
        Impl::new("BaseApi<T>")
            .generics("T: Transport")
            .method(
                Fn::new("new")
                    .param(Param::new("transport", "T"))
                    .returns("Self")
                    .body_line("Self { transport }"),
            )
            .method(
                Fn::new("transport")
                    .param(Param::receiver("&self"))
                    .returns("&T")
                    .body_line("&self.transport"),
            )
            .method(
                Fn::new("dispatch")
                    .doc("Send a request and return the decoded result unchanged.")
                    .async_()
                    .param(Param::receiver("&self"))
                    .param(Param::new("request", "Request"))
                    .returns("Result<Value, ApiError>")
                    .body_line("Ok(self.transport.request(request).await?)"),
            )
            .method(
                Fn::new("dispatch_model")
                    .doc("Send a request and convert a key-value result into `M`.")
                    .async_()
                    .generics("M: Model")
                    .param(Param::receiver("&self"))
                    .param(Param::new("request", "Request"))
                    .returns("Result<Response<M>, ApiError>")
                    .body(
                        "match self.dispatch(request).await? {\n    Value::Object(map) => Ok(Response::Parsed(M::from_map(map)?)),\n    other => Ok(Response::Raw(other)),\n}",
                    ),
            )
    }
}

impl GeneratedFile for ApiBase {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join("api").join("base.rs")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        RustFile::new()
            .use_group([Use::new("serde_json").symbol("Value")])
            .use_group([
                Use::new("crate::models::base").symbols(["Model", "ModelError"]),
                Use::new("crate::transport")
                    .symbols(["EncodeError", "Request", "Transport", "TransportError"]),
            ])
            .add(self.api_error())
            .add(self.response())
            .add(self.response_impl())
            .add(self.base_api())
            .add(self.base_api_impl())
            .render()
    }
}
