//! The palette record shared by every decoder and exporter.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{PaletteToolError, Result};

use super::{Colour, Hint, Hsv};

/// Maximum number of colours in one palette.
pub const MAX_COLORS: usize = 255;

/// Maximum number of indices in one gradient.
pub const MAX_GRADIENT_INDICES: usize = MAX_COLORS * 2;

/// Size of a bounded string including the legacy terminator byte.
pub const MAX_STRLEN: usize = 48;

/// Maximum number of hints on one colour.
pub const MAX_HINTS: usize = 4;

/// Maximum number of gradients in one palette.
pub const MAX_GRADIENTS: usize = 32;

/// Maximum number of dither pairs in one palette.
pub const MAX_DITHER_PAIRS: usize = MAX_COLORS * 2;

/// Truncate `s` to at most `MAX_STRLEN - 1` bytes on a character boundary.
pub fn bounded(s: &str) -> String {
    let limit = MAX_STRLEN - 1;
    if s.len() <= limit {
        return s.to_string();
    }
    let mut end = limit;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

/// Where a palette came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    pub url: String,
    pub conversion_tool: String,
    /// Seconds since the Unix epoch.
    pub conversion_timestamp: u64,
}

/// Colour space the channel values are expressed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorSpace {
    pub name: String,
    pub icc_filename: String,
    pub is_linear: bool,
}

impl ColorSpace {
    /// Whether any colour space information was supplied.
    pub fn is_set(&self) -> bool {
        !self.name.is_empty() || !self.icc_filename.is_empty() || self.is_linear
    }
}

/// A named colour with its usage hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    pub name: String,
    pub colour: Colour,
    pub hints: Vec<Hint>,
}

impl Swatch {
    pub fn new(name: impl AsRef<str>, colour: Colour) -> Self {
        Self {
            name: bounded(name.as_ref()),
            colour,
            hints: Vec::new(),
        }
    }
}

/// An ordered walk through the palette's colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    pub name: String,
    pub indices: Vec<usize>,
}

/// Two colours meant to be dithered together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitherPair {
    pub name: String,
    pub indices: [usize; 2],
}

/// A parsed palette.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    pub title: String,
    pub source: Source,
    pub color_space: ColorSpace,
    pub swatches: Vec<Swatch>,
    pub gradients: Vec<Gradient>,
    pub dither_pairs: Vec<DitherPair>,
}

impl Palette {
    /// Create an empty palette with a title.
    pub fn new(title: impl AsRef<str>) -> Self {
        Self {
            title: bounded(title.as_ref()),
            ..Self::default()
        }
    }

    /// Number of colours.
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    /// Check if the palette has no colours.
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Index of the colour called `name`. Unnamed colours are never matched.
    pub fn find(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.swatches.iter().position(|swatch| swatch.name == name)
    }

    /// Look up a gradient by name.
    pub fn gradient(&self, name: &str) -> Option<&Gradient> {
        self.gradients.iter().find(|gradient| gradient.name == name)
    }

    /// A 32-bit hash of every channel of every colour, in order.
    ///
    /// Names, hints, gradients and metadata do not contribute.
    pub fn color_hash(&self) -> u32 {
        let mut hash: u32 = 0;
        for swatch in &self.swatches {
            for (j, channel) in swatch.colour.channels().into_iter().enumerate() {
                let fixed = (channel.clamp(0.0, 1.0) as f64 * 2147483648.0) as u32;
                hash ^= (j as u32).wrapping_sub(fixed);
                hash ^= hash << 3;
                hash = hash.wrapping_add(hash >> 5);
                hash ^= hash << 4;
                hash = hash.wrapping_add(hash >> 17);
                hash ^= hash << 25;
                hash = hash.wrapping_add(hash >> 6);
            }
        }
        hash
    }

    /// Colour indices in declaration order.
    pub fn identity_order(&self) -> Vec<usize> {
        (0..self.swatches.len()).collect()
    }

    /// Colour indices ordered by `key`, highest first. Ties keep
    /// declaration order.
    pub fn sorted_order(&self, key: SortKey) -> Vec<usize> {
        let keys: Vec<f32> = self
            .swatches
            .iter()
            .map(|swatch| key.extract(swatch.colour))
            .collect();

        let mut order = self.identity_order();
        order.sort_by(|&a, &b| keys[b].partial_cmp(&keys[a]).unwrap_or(Ordering::Equal));
        order
    }

    /// Add a gradient over every colour ordered by `key`.
    ///
    /// A gradient with the same name is replaced.
    pub fn add_sorted_gradient(&mut self, name: impl AsRef<str>, key: SortKey) -> Result<()> {
        let name = bounded(name.as_ref());
        let indices = self.sorted_order(key);

        if let Some(existing) = self.gradients.iter_mut().find(|g| g.name == name) {
            existing.indices = indices;
            return Ok(());
        }

        if self.gradients.len() >= MAX_GRADIENTS {
            return Err(PaletteToolError::Validation {
                message: format!("cannot add gradient '{}': too many gradients", name),
                help: Some(format!("A palette holds at most {} gradients", MAX_GRADIENTS)),
            });
        }

        self.gradients.push(Gradient { name, indices });
        Ok(())
    }

    /// Add one sorted gradient per [`SortKey`].
    pub fn add_full_palette_gradients(&mut self) -> Result<()> {
        for key in SortKey::ALL {
            self.add_sorted_gradient(key.gradient_name(), key)?;
        }
        Ok(())
    }
}

/// A colour attribute to order a palette by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Red,
    Green,
    Blue,
    Hue,
    Saturation,
    Value,
    Lightness,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Red,
        SortKey::Green,
        SortKey::Blue,
        SortKey::Hue,
        SortKey::Saturation,
        SortKey::Value,
        SortKey::Lightness,
    ];

    /// Name used for the gradient built from this key.
    pub fn gradient_name(self) -> &'static str {
        match self {
            SortKey::Red => "sort by red channel",
            SortKey::Green => "sort by green channel",
            SortKey::Blue => "sort by blue channel",
            SortKey::Hue => "sort by hue",
            SortKey::Saturation => "sort by saturation",
            SortKey::Value => "sort by value",
            SortKey::Lightness => "sort by lightness",
        }
    }

    /// The value this key sorts on. Achromatic colours get a hue of 720
    /// so they group ahead of every real hue.
    fn extract(self, colour: Colour) -> f32 {
        match self {
            SortKey::Red => colour.r,
            SortKey::Green => colour.g,
            SortKey::Blue => colour.b,
            SortKey::Hue => Hsv::from_colour(colour).hue.unwrap_or(720.0),
            SortKey::Saturation => Hsv::from_colour(colour).saturation,
            SortKey::Value => Hsv::from_colour(colour).value,
            SortKey::Lightness => {
                use palette::{Hsl, IntoColor, Srgb};

                let hsl: Hsl = Srgb::new(colour.r, colour.g, colour.b).into_color();
                hsl.lightness
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Palette {
        let mut palette = Palette::new("sample");
        palette.swatches = vec![
            Swatch::new("grey", Colour::rgb(0.5, 0.5, 0.5)),
            Swatch::new("red", Colour::rgb(1.0, 0.0, 0.0)),
            Swatch::new("blue", Colour::rgb(0.0, 0.0, 1.0)),
            Swatch::new("green", Colour::rgb(0.0, 0.75, 0.0)),
        ];
        palette
    }

    #[test]
    fn test_bounded_truncates() {
        let long = "x".repeat(60);
        assert_eq!(bounded(&long).len(), 47);
        assert_eq!(bounded("short"), "short");
    }

    #[test]
    fn test_bounded_respects_char_boundary() {
        // 46 ASCII bytes followed by a two-byte character
        let s = format!("{}é", "a".repeat(46));
        assert_eq!(bounded(&s), "a".repeat(46));
    }

    #[test]
    fn test_find() {
        let mut palette = sample();
        assert_eq!(palette.find("blue"), Some(2));
        assert_eq!(palette.find("purple"), None);

        palette.swatches.push(Swatch::new("", Colour::BLACK));
        assert_eq!(palette.find(""), None);
    }

    #[test]
    fn test_sorted_order_descending() {
        let palette = sample();
        assert_eq!(palette.sorted_order(SortKey::Red), vec![1, 0, 2, 3]);
        assert_eq!(palette.sorted_order(SortKey::Green), vec![3, 0, 1, 2]);
        assert_eq!(palette.sorted_order(SortKey::Value), vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_hue_order_puts_achromatic_first() {
        let palette = sample();
        // grey (no hue), blue 240, green 120, red 0
        assert_eq!(palette.sorted_order(SortKey::Hue), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut palette = Palette::default();
        palette.swatches = vec![
            Swatch::new("a", Colour::rgb(0.2, 0.0, 0.0)),
            Swatch::new("b", Colour::rgb(0.2, 0.1, 0.0)),
            Swatch::new("c", Colour::rgb(0.2, 0.2, 0.0)),
        ];
        assert_eq!(palette.sorted_order(SortKey::Red), vec![0, 1, 2]);
    }

    #[test]
    fn test_full_palette_gradients() {
        let mut palette = sample();
        palette.add_full_palette_gradients().unwrap();
        assert_eq!(palette.gradients.len(), 7);
        assert_eq!(palette.gradients[3].name, "sort by hue");

        // Adding again replaces rather than duplicates
        palette.add_full_palette_gradients().unwrap();
        assert_eq!(palette.gradients.len(), 7);
    }

    #[test]
    fn test_sorted_gradient_capacity() {
        let mut palette = sample();
        for i in 0..MAX_GRADIENTS {
            palette.gradients.push(Gradient {
                name: format!("g{i}"),
                indices: vec![0],
            });
        }
        assert!(palette.add_sorted_gradient("one more", SortKey::Red).is_err());
        assert!(palette.add_sorted_gradient("g0", SortKey::Red).is_ok());
    }

    #[test]
    fn test_color_hash_ignores_names() {
        let a = sample();
        let mut b = sample();
        b.swatches[0].name = "gray".to_string();
        b.swatches[1].hints.push(Hint::Error);
        assert_eq!(a.color_hash(), b.color_hash());

        b.swatches[2].colour.b = 0.5;
        assert_ne!(a.color_hash(), b.color_hash());
    }

    #[test]
    fn test_color_hash_empty() {
        assert_eq!(Palette::default().color_hash(), 0);
    }
}
