use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::parser::ParseError;

/// Main error type for palettetool operations
#[derive(Error, Diagnostic, Debug)]
pub enum PaletteToolError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(palettetool::io))]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse json: '{message}' at char offset {offset}")]
    #[diagnostic(code(palettetool::parse::json))]
    Document {
        message: String,
        offset: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to parse {path}: '{message}' at byte offset {offset}")]
    #[diagnostic(code(palettetool::parse::aco))]
    Binary {
        path: PathBuf,
        message: String,
        offset: usize,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(palettetool::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(palettetool::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Export error: {message}")]
    #[diagnostic(code(palettetool::export))]
    Export {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{message}")]
    #[diagnostic(code(palettetool::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl PaletteToolError {
    /// Wrap a JSON parse failure together with the document it came from,
    /// so the report can point at the offending byte.
    pub fn document(name: impl AsRef<str>, source: String, error: ParseError) -> Self {
        let offset = error.offset.min(source.len());
        let len = usize::from(offset < source.len());
        Self::Document {
            message: error.kind.to_string(),
            offset: error.offset,
            src: NamedSource::new(name, source),
            span: (offset, len).into(),
            help: error.kind.help().map(str::to_string),
        }
    }

    /// Wrap a binary decode failure.
    pub fn binary(path: impl Into<PathBuf>, error: ParseError) -> Self {
        Self::Binary {
            path: path.into(),
            message: error.kind.to_string(),
            offset: error.offset,
        }
    }
}

pub type Result<T> = std::result::Result<T, PaletteToolError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseErrorKind;

    #[test]
    fn test_document_error_carries_offset() {
        let err = PaletteToolError::document(
            "pal.json",
            "{\"x\": 1}".to_string(),
            ParseError::new(ParseErrorKind::UnrecognizedKey, 2),
        );

        match &err {
            PaletteToolError::Document { offset, span, .. } => {
                assert_eq!(*offset, 2);
                assert_eq!(span.offset(), 2);
                assert_eq!(span.len(), 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("char offset 2"));
    }

    #[test]
    fn test_document_error_at_end_of_input() {
        let err = PaletteToolError::document(
            "pal.json",
            "{".to_string(),
            ParseError::new(ParseErrorKind::UnexpectedEnd, 1),
        );

        match err {
            PaletteToolError::Document { span, .. } => {
                assert_eq!(span.offset(), 1);
                assert_eq!(span.len(), 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_binary_error_message() {
        let err = PaletteToolError::binary(
            "swatches.aco",
            ParseError::new(ParseErrorKind::TruncatedHeader, 0),
        );
        assert_eq!(
            err.to_string(),
            "Failed to parse swatches.aco: 'end of bytes reading header' at byte offset 0"
        );
    }
}
