//! PNG swatch strip output.
//!
//! One pixel per colour on a single row, in the order given.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{PaletteToolError, Result};
use crate::types::Palette;

/// Render the colours at `order` as an `N × 1` image.
pub fn render_strip(palette: &Palette, order: &[usize]) -> Result<RgbaImage> {
    if order.is_empty() {
        return Err(PaletteToolError::Export {
            message: "cannot write a png of an empty palette".to_string(),
            help: None,
        });
    }

    let mut img: RgbaImage = ImageBuffer::new(order.len() as u32, 1);
    for (x, &index) in order.iter().enumerate() {
        let swatch = palette.swatches.get(index).ok_or_else(|| PaletteToolError::Export {
            message: format!("colour index {} is out of range", index),
            help: None,
        })?;
        img.put_pixel(x as u32, 0, Rgba(swatch.colour.to_rgba8()));
    }

    Ok(img)
}

/// Write the colours at `order` to a PNG file.
pub fn write_png(palette: &Palette, order: &[usize], path: &Path) -> Result<()> {
    let img = render_strip(palette, order)?;

    img.save(path).map_err(|e| PaletteToolError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}
