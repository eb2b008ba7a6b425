//! Structural errors raised by the palette decoders.

use miette::Diagnostic;
use thiserror::Error;

/// What went wrong. Every kind is terminal for the current parse.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("ran out of tokens")]
    OutOfTokens,

    #[error("unexpected token")]
    UnrecognizedKey,

    #[error("unexpected token type")]
    TypeMismatch,

    #[error("expected red, green, blue and alpha exactly once")]
    ColorChannelsIncomplete,

    #[error("color name missing")]
    ColorNameMissing,

    #[error("duplicate color name")]
    DuplicateColorName,

    #[error("color name not found")]
    UnknownColorReference,

    #[error("hint not recognized")]
    InvalidHint,

    #[error("dither pairs must have exactly two colors")]
    InvalidDitherPairArity,

    #[error("too many colors")]
    TooManyColors,

    #[error("too many gradients")]
    TooManyGradients,

    #[error("too many gradient indices")]
    TooManyGradientIndices,

    #[error("too many hints")]
    TooManyHints,

    #[error("too many dither pairs")]
    TooManyDitherPairs,

    #[error("too many json tokens")]
    TooManyTokens,

    #[error("invalid json")]
    InvalidJson,

    #[error("unexpected end of json")]
    UnexpectedEnd,

    #[error("palette not found")]
    PaletteNotFound,

    #[error("end of bytes reading header")]
    TruncatedHeader,

    #[error("end of bytes reading color record")]
    TruncatedColorRecord,

    #[error("end of bytes reading color name")]
    TruncatedName,

    #[error("reserved field is not zero")]
    ReservedFieldNotZero,

    #[error("unsupported color space")]
    UnsupportedColorSpace,

    #[error("expected true or false")]
    InvalidBoolean,

    #[error("hsb value out of range")]
    InvalidHsb,
}

impl ParseErrorKind {
    /// A hint for fixing the input, where one is obvious.
    pub fn help(self) -> Option<&'static str> {
        let help = match self {
            ParseErrorKind::UnrecognizedKey => "Check the key name and where it is nested",
            ParseErrorKind::ColorChannelsIncomplete => {
                "Each color needs \"red\", \"green\", \"blue\" and \"alpha\" exactly once"
            }
            ParseErrorKind::ColorNameMissing => "Give every color a non-empty \"name\"",
            ParseErrorKind::UnknownColorReference => {
                "Colors must be declared in \"colors\" before they are referenced"
            }
            ParseErrorKind::InvalidHint => "See the list of supported hints",
            ParseErrorKind::InvalidDitherPairArity => {
                "A dither pair is an array of two color names"
            }
            ParseErrorKind::TooManyColors => "A palette holds at most 255 colors",
            ParseErrorKind::TooManyGradients => "A palette holds at most 32 gradients",
            ParseErrorKind::TooManyHints => "A color carries at most 4 hints",
            ParseErrorKind::TooManyTokens => "Raise max_tokens in palettetool.yaml",
            ParseErrorKind::PaletteNotFound => "Check --json-palette-index",
            _ => return None,
        };
        Some(help)
    }
}

/// A parse failure with the byte offset it was detected at.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
#[diagnostic(code(palettetool::parse))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
