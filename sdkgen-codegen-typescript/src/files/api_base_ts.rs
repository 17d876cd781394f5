use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{Class, ClassField, CodeFile, Import, Method, Param, RawCode};

/// `src/api/base.ts`: the response type and the class every API class
/// extends.
pub struct ApiBaseTs;

/// Parameters shared by `request` and `requestModel`.
fn request_params(method: Method) -> Method {
    method
        .param(Param::new("method", "HttpMethod"))
        .param(Param::new("path", "string"))
        .param(Param::new("pathParams", "Params").default_value("{}"))
        .param(Param::new("query", "Params").default_value("{}"))
        .param(Param::new("body", "Params").default_value("{}"))
}

impl ApiBaseTs {
    fn types() -> RawCode {
        RawCode::new(
            "/** An operation result: a parsed model when the response is a map, the raw value otherwise. */\n\
             export type Response<T> = { kind: \"parsed\"; value: T } | { kind: \"raw\"; value: unknown };\n\
             \n\
             /** Request parameters keyed by wire name. */\n\
             export type Params = Record<string, unknown>;",
        )
    }

    fn base_api() -> Class {
        Class::new("BaseApi")
            .abstract_()
            .doc("Holds the transport and dispatches requests for the generated API classes.")
            .field(ClassField::new("transport", "Transport").protected().readonly())
            .method(
                Method::constructor()
                    .param(Param::new("transport", "Transport"))
                    .body_line("this.transport = transport;"),
            )
            .method(
                request_params(
                    Method::new("request")
                        .protected()
                        .async_()
                        .doc("Send a request and return the decoded response as is."),
                )
                .returns("Promise<unknown>")
                .body_line("return this.transport.request({")
                .body_line("  method,")
                .body_line("  path,")
                .body_line("  pathParams: compact(pathParams),")
                .body_line("  query: compact(query),")
                .body_line("  body: compact(body),")
                .body_line("});"),
            )
            .method(
                request_params(
                    Method::new("requestModel")
                        .protected()
                        .async_()
                        .generics("T")
                        .doc("Send a request and parse a map response with `parse`.")
                        .param(Param::new("parse", "(map: Record<string, unknown>) => T")),
                )
                .returns("Promise<Response<T>>")
                .body_line("const data = await this.request(method, path, pathParams, query, body);")
                .body_line("if (isMap(data)) {")
                .body_line("  return { kind: \"parsed\", value: parse(data) };")
                .body_line("}")
                .body_line("return { kind: \"raw\", value: data };"),
            )
    }

    fn helpers() -> RawCode {
        RawCode::new(
            "/** Spread an aggregated body: maps contribute their entries, other values go under `name`. */\n\
             export function bodyOf(name: string, value: unknown): Params {\n  \
             if (value === null || value === undefined) {\n    \
             return {};\n  \
             }\n  \
             return isMap(value) ? value : { [name]: value };\n\
             }\n\
             \n\
             function compact(params: Params): Params {\n  \
             return Object.fromEntries(\n    \
             Object.entries(params).filter(([, value]) => value !== null && value !== undefined),\n  \
             );\n\
             }\n\
             \n\
             function isMap(value: unknown): value is Record<string, unknown> {\n  \
             return typeof value === \"object\" && value !== null && !Array.isArray(value);\n\
             }",
        )
    }
}

impl GeneratedFile for ApiBaseTs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join("api").join("base.ts")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        CodeFile::new()
            .import(
                Import::new("../transport.ts")
                    .named("HttpMethod")
                    .named("Transport")
                    .type_only(),
            )
            .add(Self::types())
            .add(Self::base_api())
            .add(Self::helpers())
            .render()
    }
}
