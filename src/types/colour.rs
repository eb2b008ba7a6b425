//! Colour type, channel conversions and hex parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{PaletteToolError, Result};

/// An RGBA colour with floating point channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// White.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Build a colour from 8-bit channels.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::new(
            channel_to_f32(rgba[0]),
            channel_to_f32(rgba[1]),
            channel_to_f32(rgba[2]),
            channel_to_f32(rgba[3]),
        )
    }

    /// Convert to 8-bit RGBA channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.channels().map(channel_to_8bit)
    }

    /// Channels in `[r, g, b, a]` order.
    pub fn channels(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse a hex colour string.
    ///
    /// Accepts exactly 3, 4, 6 or 8 hex digits without a `#` prefix,
    /// case-insensitive:
    /// - `ccc` (RGB shorthand, each digit doubled)
    /// - `cccf` (RGBA shorthand)
    /// - `c0c0c0`
    /// - `c0c0c0ff`
    ///
    /// A missing alpha channel means fully opaque.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid_hex(hex));
        }

        let digits: Vec<u8> = hex.bytes().map(nibble).collect();
        let rgba = match digits.len() {
            3 => [
                digits[0] << 4 | digits[0],
                digits[1] << 4 | digits[1],
                digits[2] << 4 | digits[2],
                0xFF,
            ],
            4 => [
                digits[0] << 4 | digits[0],
                digits[1] << 4 | digits[1],
                digits[2] << 4 | digits[2],
                digits[3] << 4 | digits[3],
            ],
            6 | 8 => {
                let mut rgba = [0xFF; 4];
                for (channel, pair) in rgba.iter_mut().zip(digits.chunks_exact(2)) {
                    *channel = pair[0] << 4 | pair[1];
                }
                rgba
            }
            _ => return Err(invalid_hex(hex)),
        };

        Ok(Self::from_rgba8(rgba))
    }

    /// Format as 8 lowercase hex digits (`rrggbbaa`), no `#` prefix.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

impl FromStr for Colour {
    type Err = PaletteToolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Convert a channel in `[0, 1]` to an 8-bit value.
///
/// Out-of-range input saturates. 0.0, 0.25, 0.5, 0.75 and 1.0 map to
/// 0, 64, 127, 192 and 255.
pub fn channel_to_8bit(val: f32) -> u8 {
    let fixed = (val.clamp(0.0, 1.0) * 256.0).round() as u32;
    match fixed {
        128 => 127,
        fixed => fixed.min(255) as u8,
    }
}

/// Convert an 8-bit channel to `[0, 1]`. 127 and 255 are fixed points
/// for 0.5 and 1.0.
pub fn channel_to_f32(val: u8) -> f32 {
    match val {
        127 => 0.5,
        255 => 1.0,
        val => val as f32 / 256.0,
    }
}

fn nibble(digit: u8) -> u8 {
    (digit as char).to_digit(16).unwrap_or(0) as u8
}

fn invalid_hex(hex: &str) -> PaletteToolError {
    let help = if hex.starts_with('#') {
        "Omit the leading '#'"
    } else {
        "Use 3, 4, 6 or 8 hex digits (rgb, rgba, rrggbb or rrggbbaa)"
    };
    PaletteToolError::Parse {
        message: format!("Invalid hex colour: {}", hex),
        help: Some(help.to_string()),
    }
}
