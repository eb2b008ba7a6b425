//! Adobe colour swatch (`.aco`) decoding.
//!
//! Layout, all big-endian:
//!
//! ```text
//! u16 version
//! u16 count
//! count × {
//!     u16 colour space, u16 w, u16 x, u16 y, u16 z, u16 reserved,
//!     u16 name length (UTF-16 code units),
//!     name length × u16 name
//! }
//! ```
//!
//! Only the RGB and HSB colour spaces are understood.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{bounded, Colour, Hsv, Palette, Source, Swatch, MAX_COLORS};

use super::error::{ParseError, ParseErrorKind, ParseResult};

/// Recorded as the conversion tool of decoded palettes.
pub const CONVERSION_TOOL: &str = concat!("palettetool ", env!("CARGO_PKG_VERSION"));

const RECORD_LEN: usize = 14;
const COLOR_SPACE_RGB: u16 = 0;
const COLOR_SPACE_HSB: u16 = 1;

/// Metadata stamped onto a decoded palette.
#[derive(Debug, Clone, Default)]
pub struct AcoOptions {
    /// Where the swatch file came from.
    pub source_url: Option<String>,
    /// Conversion time in seconds since the epoch; defaults to now.
    pub timestamp: Option<u64>,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Read a big-endian u16. Callers check `remaining` first.
    fn u16(&mut self) -> u16 {
        let value = u16::from_be_bytes([self.bytes[self.pos], self.bytes[self.pos + 1]]);
        self.pos += 2;
        value
    }
}

/// Decode an `.aco` byte stream into a palette.
pub fn decode_aco(bytes: &[u8], options: &AcoOptions) -> ParseResult<Palette> {
    let mut reader = Reader { bytes, pos: 0 };

    if reader.remaining() < 4 {
        return Err(ParseError::new(ParseErrorKind::TruncatedHeader, 0));
    }
    let _version = reader.u16();
    let count = usize::from(reader.u16());
    if count > MAX_COLORS {
        return Err(ParseError::new(ParseErrorKind::TooManyColors, 2));
    }

    let mut swatches = Vec::with_capacity(count);
    for _ in 0..count {
        swatches.push(decode_record(&mut reader)?);
    }

    let timestamp = options.timestamp.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    });

    Ok(Palette {
        source: Source {
            url: options.source_url.as_deref().map(bounded).unwrap_or_default(),
            conversion_tool: bounded(CONVERSION_TOOL),
            conversion_timestamp: timestamp,
        },
        swatches,
        ..Palette::default()
    })
}

fn decode_record(reader: &mut Reader<'_>) -> ParseResult<Swatch> {
    let start = reader.pos;
    if reader.remaining() < RECORD_LEN {
        return Err(ParseError::new(ParseErrorKind::TruncatedColorRecord, start));
    }

    let color_space = reader.u16();
    let [w, x, y, z] = [reader.u16(), reader.u16(), reader.u16(), reader.u16()];
    let _reserved = reader.u16();
    let name_len = usize::from(reader.u16());

    let colour = match color_space {
        COLOR_SPACE_RGB => {
            if z != 0 {
                return Err(ParseError::new(ParseErrorKind::ReservedFieldNotZero, start));
            }
            Colour::rgb(unit(w), unit(x), unit(y))
        }
        COLOR_SPACE_HSB => {
            let saturation = unit(x);
            let hue = if saturation == 0.0 {
                None
            } else {
                Some((f32::from(w) / 182.04) % 360.0)
            };
            let [r, g, b] = Hsv::new(hue, saturation, unit(y))
                .to_rgb()
                .ok_or(ParseError::new(ParseErrorKind::InvalidHsb, start))?;
            Colour::rgb(r, g, b)
        }
        _ => {
            return Err(ParseError::new(
                ParseErrorKind::UnsupportedColorSpace,
                start,
            ))
        }
    };

    if reader.remaining() < name_len * 2 {
        return Err(ParseError::new(ParseErrorKind::TruncatedName, reader.pos));
    }
    let units: Vec<u16> = (0..name_len).map(|_| reader.u16()).collect();

    Ok(Swatch::new(decode_name(&units), colour))
}

fn unit(value: u16) -> f32 {
    f32::from(value) / 65535.0
}

/// Decode UTF-16 code units one at a time. Surrogates are not paired and
/// become U+FFFD; a NUL ends the name.
fn decode_name(units: &[u16]) -> String {
    let name: String = units
        .iter()
        .take_while(|&&unit| unit != 0)
        .map(|&unit| char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    bounded(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a swatch file from `(colour space, [w, x, y, z], name)` records.
    fn aco(records: &[(u16, [u16; 4], &str)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&2u16.to_be_bytes());
        bytes.extend_from_slice(&(records.len() as u16).to_be_bytes());
        for (space, channels, name) in records {
            bytes.extend_from_slice(&space.to_be_bytes());
            for channel in channels {
                bytes.extend_from_slice(&channel.to_be_bytes());
            }
            bytes.extend_from_slice(&0u16.to_be_bytes());
            let units: Vec<u16> = name.encode_utf16().collect();
            bytes.extend_from_slice(&(units.len() as u16).to_be_bytes());
            for unit in units {
                bytes.extend_from_slice(&unit.to_be_bytes());
            }
        }
        bytes
    }

    fn options() -> AcoOptions {
        AcoOptions {
            source_url: Some("https://example.com/swatches.aco".to_string()),
            timestamp: Some(1_700_000_000),
        }
    }

    #[test]
    fn test_two_rgb_colours_without_names() {
        let bytes = aco(&[
            (0, [65535, 0, 0, 0], ""),
            (0, [0, 0, 65535, 0], ""),
        ]);
        let palette = decode_aco(&bytes, &options()).unwrap();

        assert_eq!(palette.len(), 2);
        assert_eq!(palette.swatches[0].colour, Colour::rgb(1.0, 0.0, 0.0));
        assert_eq!(palette.swatches[1].colour, Colour::rgb(0.0, 0.0, 1.0));
        for swatch in &palette.swatches {
            assert_eq!(swatch.name, "");
            assert_eq!(swatch.colour.a, 1.0);
            assert!(swatch.hints.is_empty());
        }
        assert!(palette.gradients.is_empty());
        assert!(palette.dither_pairs.is_empty());
        assert_eq!(palette.title, "");
    }

    #[test]
    fn test_source_metadata() {
        let palette = decode_aco(&aco(&[]), &options()).unwrap();
        assert_eq!(palette.source.url, "https://example.com/swatches.aco");
        assert_eq!(palette.source.conversion_tool, CONVERSION_TOOL);
        assert_eq!(palette.source.conversion_timestamp, 1_700_000_000);

        let palette = decode_aco(&aco(&[]), &AcoOptions::default()).unwrap();
        assert_eq!(palette.source.url, "");
        assert!(palette.source.conversion_timestamp > 0);
    }

    #[test]
    fn test_names() {
        let bytes = aco(&[(0, [0, 0, 0, 0], "Midnight Blue"), (0, [0, 0, 0, 0], "Café")]);
        let palette = decode_aco(&bytes, &options()).unwrap();
        assert_eq!(palette.swatches[0].name, "Midnight Blue");
        assert_eq!(palette.swatches[1].name, "Café");
    }

    #[test]
    fn test_name_stops_at_nul() {
        let bytes = aco(&[(0, [0, 0, 0, 0], "ab\0cd")]);
        let palette = decode_aco(&bytes, &options()).unwrap();
        assert_eq!(palette.swatches[0].name, "ab");
    }

    #[test]
    fn test_surrogates_become_replacement() {
        assert_eq!(decode_name(&[0x0041, 0xD83D, 0xDE00]), "A\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_hsb() {
        // hue 120 degrees, full saturation and brightness
        let bytes = aco(&[(1, [(120.0f32 * 182.04) as u16, 65535, 65535, 0], "green")]);
        let palette = decode_aco(&bytes, &options()).unwrap();
        let [r, g, b, a] = palette.swatches[0].colour.to_rgba8();
        assert_eq!([r, g, b, a], [0, 255, 0, 255]);
    }

    #[test]
    fn test_hsb_grey_ignores_hue() {
        let bytes = aco(&[(1, [9000, 0, 32767, 0], "grey")]);
        let palette = decode_aco(&bytes, &options()).unwrap();
        let colour = palette.swatches[0].colour;
        assert_eq!(colour.r, colour.g);
        assert_eq!(colour.g, colour.b);
    }

    #[test]
    fn test_truncated_header() {
        assert_eq!(
            decode_aco(&[0, 2, 0], &options()).unwrap_err(),
            ParseError::new(ParseErrorKind::TruncatedHeader, 0)
        );
    }

    #[test]
    fn test_truncated_record() {
        let mut bytes = aco(&[(0, [0, 0, 0, 0], "")]);
        bytes.truncate(10);
        assert_eq!(
            decode_aco(&bytes, &options()).unwrap_err(),
            ParseError::new(ParseErrorKind::TruncatedColorRecord, 4)
        );
    }

    #[test]
    fn test_truncated_name() {
        let mut bytes = aco(&[(0, [0, 0, 0, 0], "abc")]);
        bytes.pop();
        assert_eq!(
            decode_aco(&bytes, &options()).unwrap_err(),
            ParseError::new(ParseErrorKind::TruncatedName, 18)
        );
    }

    #[test]
    fn test_count_exceeds_data() {
        let mut bytes = aco(&[(0, [0, 0, 0, 0], "")]);
        bytes[3] = 2;
        assert_eq!(
            decode_aco(&bytes, &options()).unwrap_err().kind,
            ParseErrorKind::TruncatedColorRecord
        );
    }

    #[test]
    fn test_rgb_reserved_field() {
        let bytes = aco(&[(0, [0, 0, 0, 7], "")]);
        assert_eq!(
            decode_aco(&bytes, &options()).unwrap_err(),
            ParseError::new(ParseErrorKind::ReservedFieldNotZero, 4)
        );
    }

    #[test]
    fn test_unsupported_color_space() {
        let bytes = aco(&[(0, [0, 0, 0, 0], ""), (2, [0, 0, 0, 0], "")]);
        assert_eq!(
            decode_aco(&bytes, &options()).unwrap_err(),
            ParseError::new(ParseErrorKind::UnsupportedColorSpace, 18)
        );
    }

    #[test]
    fn test_too_many_colors() {
        let bytes = [0, 2, 1, 0];
        assert_eq!(
            decode_aco(&bytes, &options()).unwrap_err(),
            ParseError::new(ParseErrorKind::TooManyColors, 2)
        );
    }
}
