//! HSV <-> RGB conversion.
//!
//! Hue is in degrees `[0, 360)`. Achromatic colours (saturation 0) have no
//! hue, which is modelled as `None` rather than a sentinel angle.

use super::Colour;

/// A colour in hue/saturation/value form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in degrees, `None` when undefined (saturation is zero).
    pub hue: Option<f32>,
    pub saturation: f32,
    pub value: f32,
}

impl Hsv {
    pub fn new(hue: Option<f32>, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Convert RGB channels in `[0, 1]` to HSV.
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        let value = max;
        let saturation = if max != 0.0 { (max - min) / max } else { 0.0 };

        if saturation == 0.0 {
            return Self::new(None, saturation, value);
        }

        let delta = max - min;
        let sector = if r == max {
            (g - b) / delta
        } else if g == max {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };

        let mut hue = sector * 60.0;
        if hue < 0.0 {
            hue += 360.0;
        }

        Self::new(Some(hue), saturation, value)
    }

    /// Convert a colour's RGB channels to HSV, ignoring alpha.
    pub fn from_colour(colour: Colour) -> Self {
        Self::from_rgb(colour.r, colour.g, colour.b)
    }

    /// Convert to RGB channels.
    ///
    /// Returns `None` for out-of-range components, for a defined hue with
    /// zero saturation, and for an undefined hue with non-zero saturation.
    pub fn to_rgb(self) -> Option<[f32; 3]> {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(self.saturation) || !in_unit(self.value) {
            return None;
        }

        let v = self.value;
        let s = self.saturation;

        let hue = match (self.hue, s == 0.0) {
            (None, true) => return Some([v, v, v]),
            (Some(hue), false) if (0.0..=360.0).contains(&hue) => hue,
            _ => return None,
        };

        let h = if hue == 360.0 { 0.0 } else { hue / 60.0 };
        let sector = h.floor();
        let f = h - sector;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let rgb = match sector as u8 {
            0 => [v, t, p],
            1 => [q, v, p],
            2 => [p, v, t],
            3 => [p, q, v],
            4 => [t, p, v],
            _ => [v, p, q],
        };

        Some(rgb)
    }
}
