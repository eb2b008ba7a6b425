//! JSON palette document output.
//!
//! Writes the same `{"palettes": [...]}` layout the parser reads, so an
//! exported document parses back to the same record. References are written
//! as colour names, which means every colour a gradient or dither pair
//! points at needs one.

use serde::{Serialize, Serializer};

use crate::error::{PaletteToolError, Result};
use crate::types::{ColorSpace, Palette, Source};

#[derive(Serialize)]
struct DocumentView<'a> {
    palettes: Vec<PaletteView<'a>>,
}

#[derive(Serialize)]
struct PaletteView<'a> {
    title: &'a str,
    color_hash: String,
    source: SourceView<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color_space: Option<ColorSpaceView<'a>>,
    colors: Vec<ColorView<'a>>,
    hints: Ordered<&'a str, Vec<&'static str>>,
    gradients: Ordered<&'a str, Vec<&'a str>>,
    dither_pairs: Ordered<&'a str, [&'a str; 2]>,
}

#[derive(Serialize)]
struct SourceView<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    url: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    conversion_tool: &'a str,
    conversion_date: String,
}

impl<'a> From<&'a Source> for SourceView<'a> {
    fn from(source: &'a Source) -> Self {
        Self {
            url: &source.url,
            conversion_tool: &source.conversion_tool,
            conversion_date: source.conversion_timestamp.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ColorSpaceView<'a> {
    name: &'a str,
    icc_filename: &'a str,
    is_linear: bool,
}

impl<'a> From<&'a ColorSpace> for ColorSpaceView<'a> {
    fn from(color_space: &'a ColorSpace) -> Self {
        Self {
            name: &color_space.name,
            icc_filename: &color_space.icc_filename,
            is_linear: color_space.is_linear,
        }
    }
}

#[derive(Serialize)]
struct ColorView<'a> {
    name: &'a str,
    red: f32,
    green: f32,
    blue: f32,
    alpha: f32,
}

/// A map that serializes its entries in insertion order.
struct Ordered<K, V>(Vec<(K, V)>);

impl<K: Serialize, V: Serialize> Serialize for Ordered<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Render palettes as a pretty-printed JSON document.
pub fn to_json(palettes: &[Palette]) -> Result<String> {
    let views = palettes
        .iter()
        .map(palette_view)
        .collect::<Result<Vec<_>>>()?;

    let mut json = serde_json::to_string_pretty(&DocumentView { palettes: views })
        .map_err(|e| export_error(format!("failed to generate json palette: {}", e)))?;
    json.push('\n');
    Ok(json)
}

fn palette_view(palette: &Palette) -> Result<PaletteView<'_>> {
    let colors = palette
        .swatches
        .iter()
        .map(|swatch| -> Result<ColorView<'_>> {
            // serde_json writes non-finite floats as null
            if !swatch.colour.channels().iter().all(|c| c.is_finite()) {
                return Err(PaletteToolError::Export {
                    message: format!("colour '{}' has a non-finite channel", swatch.name),
                    help: Some("Channels must be finite numbers, usually in 0..1".to_string()),
                });
            }
            Ok(ColorView {
                name: &swatch.name,
                red: swatch.colour.r,
                green: swatch.colour.g,
                blue: swatch.colour.b,
                alpha: swatch.colour.a,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let hints: Vec<(&str, Vec<&'static str>)> = palette
        .swatches
        .iter()
        .filter(|swatch| !swatch.hints.is_empty())
        .map(|swatch| {
            let names = swatch.hints.iter().map(|hint| hint.as_str()).collect();
            (swatch.name.as_str(), names)
        })
        .collect();

    let gradients = palette
        .gradients
        .iter()
        .map(|gradient| -> Result<(&str, Vec<&str>)> {
            let names = gradient
                .indices
                .iter()
                .map(|&index| colour_name(palette, index, &gradient.name))
                .collect::<Result<Vec<_>>>()?;
            Ok((gradient.name.as_str(), names))
        })
        .collect::<Result<Vec<_>>>()?;

    let dither_pairs = palette
        .dither_pairs
        .iter()
        .map(|pair| -> Result<(&str, [&str; 2])> {
            let [a, b] = pair.indices;
            Ok((
                pair.name.as_str(),
                [
                    colour_name(palette, a, &pair.name)?,
                    colour_name(palette, b, &pair.name)?,
                ],
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PaletteView {
        title: &palette.title,
        color_hash: palette.color_hash().to_string(),
        source: SourceView::from(&palette.source),
        color_space: palette
            .color_space
            .is_set()
            .then(|| ColorSpaceView::from(&palette.color_space)),
        colors,
        hints: Ordered(hints),
        gradients: Ordered(gradients),
        dither_pairs: Ordered(dither_pairs),
    })
}

fn colour_name<'a>(palette: &'a Palette, index: usize, owner: &str) -> Result<&'a str> {
    match palette.swatches.get(index) {
        Some(swatch) if !swatch.name.is_empty() => Ok(&swatch.name),
        Some(_) => Err(PaletteToolError::Export {
            message: format!("'{}' references an unnamed colour", owner),
            help: Some("Name every colour before exporting gradients as JSON".to_string()),
        }),
        None => Err(export_error(format!(
            "'{}' references colour index {} but the palette has {} colours",
            owner,
            index,
            palette.len()
        ))),
    }
}

fn export_error(message: String) -> PaletteToolError {
    PaletteToolError::Export {
        message,
        help: None,
    }
}
