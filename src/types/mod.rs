//! Core domain types for palettetool.
//!
//! - `Colour` - RGBA colour values and 8-bit/hex conversions
//! - `Hsv` - hue/saturation/value form of a colour
//! - `Hint` - semantic usage hints
//! - `Palette` - the parsed palette record

mod colour;
mod hint;
mod hsv;
mod palette;

pub use colour::{channel_to_8bit, channel_to_f32, Colour};
pub use hint::Hint;
pub use hsv::Hsv;
pub use palette::{
    bounded, ColorSpace, DitherPair, Gradient, Palette, Source, SortKey, Swatch, MAX_COLORS,
    MAX_DITHER_PAIRS, MAX_GRADIENTS, MAX_GRADIENT_INDICES, MAX_HINTS, MAX_STRLEN,
};
