use std::path::{Path, PathBuf};

use sdkgen_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{Class, CodeFile, Interface, InterfaceField, Method, Param, RawCode};

/// `src/transport.ts`: the request description and the transport contract
/// the user implements.
pub struct TransportTs;

impl TransportTs {
    fn http_method() -> RawCode {
        RawCode::new(
            "/** HTTP verbs an operation may use. */\n\
             export type HttpMethod = \"GET\" | \"POST\" | \"PUT\" | \"PATCH\" | \"DELETE\" | \"HEAD\" | \"OPTIONS\";",
        )
    }

    fn request() -> Interface {
        Interface::new("Request")
            .doc("One operation call, as handed to the transport.")
            .field(InterfaceField::new("method", "HttpMethod"))
            .field(
                InterfaceField::new("path", "string")
                    .doc("Path template with `{name}` placeholders, filled from `pathParams`."),
            )
            .field(InterfaceField::new("pathParams", "Record<string, unknown>"))
            .field(InterfaceField::new("query", "Record<string, unknown>"))
            .field(InterfaceField::new("body", "Record<string, unknown>"))
    }

    fn transport() -> RawCode {
        RawCode::new(
            "/**\n \
             * Performs HTTP requests for the generated API classes.\n \
             *\n \
             * Resolves with the decoded response body, or rejects with a\n \
             * {@link TransportError}.\n \
             */\n\
             export interface Transport {\n  \
             request(request: Request): Promise<unknown>;\n\
             }",
        )
    }

    fn transport_error() -> Class {
        Class::new("TransportError")
            .extends("Error")
            .doc("Raised by transports when a request cannot be completed.")
            .method(
                Method::constructor()
                    .param(Param::new("message", "string"))
                    .param(Param::new("options", "ErrorOptions").optional())
                    .body_line("super(message, options);")
                    .body_line("this.name = \"TransportError\";"),
            )
    }
}

impl GeneratedFile for TransportTs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("src").join("transport.ts")
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite().with_header(GENERATED_HEADER)
    }

    fn render(&self) -> String {
        CodeFile::new()
            .add(Self::http_method())
            .add(Self::request())
            .add(Self::transport())
            .add(Self::transport_error())
            .render()
    }
}
