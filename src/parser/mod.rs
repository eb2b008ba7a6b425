//! Palette decoders.
//!
//! Two inputs produce the same [`Palette`](crate::types::Palette) record:
//!
//! - JSON palette documents, tokenized into a flat span array and walked
//!   once by a schema-driven parser
//! - Adobe `.aco` swatch files, decoded by a linear big-endian reader
//!
//! Both report the first structural problem as a [`ParseError`] carrying
//! its byte offset. Neither performs I/O.
//!
//! # Usage
//!
//! ```ignore
//! use palettetool::parser::{parse_palette_document, DEFAULT_MAX_TOKENS};
//!
//! let source = std::fs::read_to_string("sunset.json")?;
//! let palette = parse_palette_document(&source, 0, DEFAULT_MAX_TOKENS)?;
//!
//! for swatch in &palette.swatches {
//!     println!("{} {}", swatch.name, swatch.colour);
//! }
//! ```

mod cursor;
mod error;
mod primitive;
pub mod aco;
pub mod json;
pub mod tokenizer;

pub use aco::{decode_aco, AcoOptions, CONVERSION_TOOL};
pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use json::{parse_palette_document, parse_palette_tokens, parse_palettes};
pub use tokenizer::{tokenize, Token, TokenKind, DEFAULT_MAX_TOKENS};
