//! palettetool - colour palette conversion
//!
//! A library for decoding palettes from JSON documents and Adobe `.aco`
//! swatch files into a bounded, validated record, and for exporting that
//! record as JSON, GIMP `.gpl` or a PNG swatch strip.

pub mod cli;
pub mod error;
pub mod export;
pub mod manifest;
pub mod output;
pub mod parser;
pub mod types;

pub use error::{PaletteToolError, Result};
pub use export::{render_strip, to_gpl, to_json, write_png};
pub use manifest::{Manifest, MANIFEST_FILENAME};
pub use parser::{
    decode_aco, parse_palette_document, parse_palette_tokens, parse_palettes, tokenize,
    AcoOptions, ParseError, ParseErrorKind, Token, TokenKind, DEFAULT_MAX_TOKENS,
};
pub use types::{
    channel_to_8bit, channel_to_f32, ColorSpace, Colour, DitherPair, Gradient, Hint, Hsv, Palette,
    SortKey, Source, Swatch,
};
