//! Palette documents in JSON.
//!
//! The parser walks the flat token stream once. Each sub-parser is entered
//! with the cursor on its value and returns with the cursor one past it.
//! Keys are dispatched with a `match`; anything unrecognised is an error at
//! the key's offset.
//!
//! Colours must appear before anything that references them by name:
//!
//! ```json
//! {
//!   "palettes": [{
//!     "title": "Sunset",
//!     "colors": [{"name": "sky", "red": 0.25, "green": 0.5, "blue": 1, "alpha": 1}],
//!     "hints": {"sky": ["background"]},
//!     "gradients": {"fade": ["sky"]}
//!   }]
//! }
//! ```

use crate::types::{
    bounded, ColorSpace, Colour, DitherPair, Gradient, Hint, Palette, Source, Swatch, MAX_COLORS,
    MAX_DITHER_PAIRS, MAX_GRADIENTS, MAX_GRADIENT_INDICES, MAX_HINTS,
};

use super::cursor::Cursor;
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::primitive::{read_bool, read_f32, read_string, read_u64};
use super::tokenizer::{tokenize, Token, TokenKind};

const CHANNELS: [&str; 4] = ["red", "green", "blue", "alpha"];

/// Tokenize `source` and parse the palette at `index`.
pub fn parse_palette_document(
    source: &str,
    index: usize,
    max_tokens: usize,
) -> ParseResult<Palette> {
    let tokens = tokenize(source, max_tokens)?;
    parse_palettes(source, &tokens, index, 1)?
        .pop()
        .ok_or_else(|| not_found(&tokens))
}

/// Parse `count` palettes starting at `first` from a `{"palettes": [...]}`
/// document.
pub fn parse_palettes(
    source: &str,
    tokens: &[Token],
    first: usize,
    count: usize,
) -> ParseResult<Vec<Palette>> {
    let mut cursor = Cursor::new(source, tokens);
    let end = cursor.enter(TokenKind::Object)?;

    let mut palettes = None;
    while cursor.within(end) {
        let key = cursor.key()?;
        let unmatched = cursor.error(ParseErrorKind::UnrecognizedKey);
        cursor.advance();
        match &*key {
            "palettes" => palettes = Some(parse_palette_array(&mut cursor, first, count)?),
            _ => return Err(unmatched),
        }
    }

    palettes.ok_or_else(|| not_found(tokens))
}

/// `PaletteNotFound` at the closing brace of the root object.
fn not_found(tokens: &[Token]) -> ParseError {
    let offset = tokens.first().map_or(0, |root| root.end.saturating_sub(1));
    ParseError::new(ParseErrorKind::PaletteNotFound, offset)
}

/// Parse a single bare palette object.
pub fn parse_palette_tokens(source: &str, tokens: &[Token]) -> ParseResult<Palette> {
    let mut cursor = Cursor::new(source, tokens);
    parse_palette(&mut cursor)
}

fn parse_palette_array(
    cursor: &mut Cursor<'_>,
    first: usize,
    count: usize,
) -> ParseResult<Vec<Palette>> {
    let array = cursor.expect(TokenKind::Array)?;
    if first.saturating_add(count) > array.size {
        return Err(ParseError::new(ParseErrorKind::PaletteNotFound, array.start));
    }

    let end = cursor.enter(TokenKind::Array)?;
    for _ in 0..first {
        cursor.skip_value()?;
    }

    let mut palettes = Vec::with_capacity(count);
    for _ in 0..count {
        palettes.push(parse_palette(cursor)?);
    }

    while cursor.within(end) {
        cursor.skip_value()?;
    }
    Ok(palettes)
}

fn parse_palette(cursor: &mut Cursor<'_>) -> ParseResult<Palette> {
    let end = cursor.enter(TokenKind::Object)?;
    let mut palette = Palette::default();

    while cursor.within(end) {
        let key = cursor.key()?;
        let unmatched = cursor.error(ParseErrorKind::UnrecognizedKey);
        cursor.advance();
        match &*key {
            "title" => palette.title = read_string(cursor)?,
            // Recomputed on export
            "color_hash" => cursor.skip_value()?,
            "source" => palette.source = parse_source(cursor)?,
            "color_space" => palette.color_space = parse_color_space(cursor)?,
            "colors" => parse_colors(cursor, &mut palette)?,
            "hints" => parse_hints(cursor, &mut palette)?,
            "gradients" => parse_gradients(cursor, &mut palette)?,
            "dither_pairs" => parse_dither_pairs(cursor, &mut palette)?,
            _ => return Err(unmatched),
        }
    }

    Ok(palette)
}

fn parse_source(cursor: &mut Cursor<'_>) -> ParseResult<Source> {
    let end = cursor.enter(TokenKind::Object)?;
    let mut source = Source::default();

    while cursor.within(end) {
        let key = cursor.key()?;
        let unmatched = cursor.error(ParseErrorKind::UnrecognizedKey);
        cursor.advance();
        match &*key {
            "url" => source.url = read_string(cursor)?,
            "conversion_tool" => source.conversion_tool = read_string(cursor)?,
            "conversion_date" => source.conversion_timestamp = read_u64(cursor)?,
            _ => return Err(unmatched),
        }
    }

    Ok(source)
}

fn parse_color_space(cursor: &mut Cursor<'_>) -> ParseResult<ColorSpace> {
    let end = cursor.enter(TokenKind::Object)?;
    let mut color_space = ColorSpace::default();

    while cursor.within(end) {
        let key = cursor.key()?;
        let unmatched = cursor.error(ParseErrorKind::UnrecognizedKey);
        cursor.advance();
        match &*key {
            "name" => color_space.name = read_string(cursor)?,
            "icc_filename" => color_space.icc_filename = read_string(cursor)?,
            "is_linear" => color_space.is_linear = read_bool(cursor)?,
            _ => return Err(unmatched),
        }
    }

    Ok(color_space)
}

fn parse_colors(cursor: &mut Cursor<'_>, palette: &mut Palette) -> ParseResult<()> {
    let array = cursor.expect(TokenKind::Array)?;
    if array.size > MAX_COLORS {
        return Err(ParseError::new(ParseErrorKind::TooManyColors, array.start));
    }
    let end = cursor.enter(TokenKind::Array)?;

    // A repeated "colors" key starts over; anything indexing the old list
    // goes with it.
    palette.swatches.clear();
    palette.gradients.clear();
    palette.dither_pairs.clear();

    while cursor.within(end) {
        let start = cursor.current()?.start;
        let swatch = parse_color(cursor)?;
        if palette.find(&swatch.name).is_some() {
            return Err(ParseError::new(ParseErrorKind::DuplicateColorName, start));
        }
        palette.swatches.push(swatch);
    }

    Ok(())
}

fn parse_color(cursor: &mut Cursor<'_>) -> ParseResult<Swatch> {
    let start = cursor.expect(TokenKind::Object)?.start;
    let end = cursor.enter(TokenKind::Object)?;

    let mut name = String::new();
    let mut rgba = [0.0f32; 4];
    let mut seen = [0u32; 4];

    while cursor.within(end) {
        let key = cursor.key()?;
        let unmatched = cursor.error(ParseErrorKind::UnrecognizedKey);
        cursor.advance();
        if key == "name" {
            name = read_string(cursor)?;
            continue;
        }
        let Some(channel) = CHANNELS.iter().position(|&c| c == &*key) else {
            return Err(unmatched);
        };
        rgba[channel] = read_f32(cursor)?;
        seen[channel] += 1;
    }

    if seen.iter().any(|&count| count != 1) {
        return Err(ParseError::new(
            ParseErrorKind::ColorChannelsIncomplete,
            start,
        ));
    }
    if name.is_empty() {
        return Err(ParseError::new(ParseErrorKind::ColorNameMissing, start));
    }

    let [r, g, b, a] = rgba;
    Ok(Swatch {
        name,
        colour: Colour::new(r, g, b, a),
        hints: Vec::new(),
    })
}

fn parse_hints(cursor: &mut Cursor<'_>, palette: &mut Palette) -> ParseResult<()> {
    let end = cursor.enter(TokenKind::Object)?;

    while cursor.within(end) {
        let index = resolve(cursor, palette)?;
        cursor.advance();

        let list_end = cursor.enter(TokenKind::Array)?;
        let mut hints = Vec::with_capacity(MAX_HINTS);
        while cursor.within(list_end) {
            let hint = Hint::from_name(&cursor.string()?)
                .ok_or_else(|| cursor.error(ParseErrorKind::InvalidHint))?;
            if hints.len() >= MAX_HINTS {
                return Err(cursor.error(ParseErrorKind::TooManyHints));
            }
            hints.push(hint);
            cursor.advance();
        }
        palette.swatches[index].hints = hints;
    }

    Ok(())
}

fn parse_gradients(cursor: &mut Cursor<'_>, palette: &mut Palette) -> ParseResult<()> {
    let end = cursor.enter(TokenKind::Object)?;

    while cursor.within(end) {
        let name = bounded(&cursor.key()?);
        if palette.gradients.len() >= MAX_GRADIENTS {
            return Err(cursor.error(ParseErrorKind::TooManyGradients));
        }
        cursor.advance();

        let indices = resolve_list(
            cursor,
            palette,
            MAX_GRADIENT_INDICES,
            ParseErrorKind::TooManyGradientIndices,
        )?;
        palette.gradients.push(Gradient { name, indices });
    }

    Ok(())
}

fn parse_dither_pairs(cursor: &mut Cursor<'_>, palette: &mut Palette) -> ParseResult<()> {
    let end = cursor.enter(TokenKind::Object)?;

    while cursor.within(end) {
        let name = bounded(&cursor.key()?);
        if palette.dither_pairs.len() >= MAX_DITHER_PAIRS {
            return Err(cursor.error(ParseErrorKind::TooManyDitherPairs));
        }
        cursor.advance();

        let array = cursor.expect(TokenKind::Array)?;
        let arity_error = ParseError::new(ParseErrorKind::InvalidDitherPairArity, array.start);
        if array.size != 2 {
            return Err(arity_error);
        }

        let indices = resolve_list(cursor, palette, 2, ParseErrorKind::InvalidDitherPairArity)?;
        let &[a, b] = indices.as_slice() else {
            return Err(arity_error);
        };
        palette.dither_pairs.push(DitherPair {
            name,
            indices: [a, b],
        });
    }

    Ok(())
}

/// Resolve the colour named by the string at the cursor, without advancing.
fn resolve(cursor: &Cursor<'_>, palette: &Palette) -> ParseResult<usize> {
    palette
        .find(&bounded(&cursor.string()?))
        .ok_or_else(|| cursor.error(ParseErrorKind::UnknownColorReference))
}

/// Resolve an array of colour names to indices, in array order.
fn resolve_list(
    cursor: &mut Cursor<'_>,
    palette: &Palette,
    limit: usize,
    overflow: ParseErrorKind,
) -> ParseResult<Vec<usize>> {
    let end = cursor.enter(TokenKind::Array)?;
    let mut indices = Vec::new();

    while cursor.within(end) {
        let index = resolve(cursor, palette)?;
        if indices.len() >= limit {
            return Err(cursor.error(overflow));
        }
        indices.push(index);
        cursor.advance();
    }

    Ok(indices)
}
