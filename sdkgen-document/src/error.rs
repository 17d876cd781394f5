use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use thiserror::Error;

/// Result type for document operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Keeps the document text and its filename together so every error can
/// point back into the source.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a JSON syntax error.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = (source.line() > 0).then(|| {
            let offset = SourceOffset::from_location(&self.src, source.line(), source.column());
            SourceSpan::new(offset, 1)
        });
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a YAML syntax error.
    pub fn yaml_error(&self, source: serde_yaml::Error) -> Box<Error> {
        let span = source
            .location()
            .map(|loc| SourceSpan::from((loc.index(), 1)));
        Box::new(Error::Yaml {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create an error for a document that is neither flavor.
    pub fn unknown_format(&self) -> Box<Error> {
        Box::new(Error::UnknownFormat {
            src: self.named_source(),
        })
    }

    /// Create an error for a well-formed document with the wrong shape.
    pub fn invalid_structure(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::InvalidStructure {
            src: self.named_source(),
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(sdkgen::io),
        help("pass the document location with --input or set [input] path in sdkgen.toml")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse API document")]
    #[diagnostic(code(sdkgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML API document")]
    #[diagnostic(code(sdkgen::parse_error))]
    Yaml {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unrecognized API document")]
    #[diagnostic(
        code(sdkgen::unknown_format),
        help(
            "expected either a top-level 'groups' object or an OpenAPI document with 'paths' or 'components'"
        )
    )]
    UnknownFormat {
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("invalid API document: {message}")]
    #[diagnostic(code(sdkgen::invalid_structure))]
    InvalidStructure {
        #[source_code]
        src: NamedSource<String>,
        message: String,
    },
}
