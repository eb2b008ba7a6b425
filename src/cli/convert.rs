//! Convert command implementation.
//!
//! Reads an `.aco` swatch file or a JSON palette document and writes it as
//! JSON, a GIMP palette or a PNG swatch strip.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{PaletteToolError, Result};
use crate::export::{to_gpl, to_json, write_png};
use crate::manifest::Manifest;
use crate::output::{display_path, plural, Printer};
use crate::parser::{decode_aco, parse_palette_document, AcoOptions};
use crate::types::{Palette, SortKey};

use super::formats::FileKind;

/// Convert a palette from one format to another
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// File to convert
    #[arg(long = "in", value_name = "FILE")]
    pub input: PathBuf,

    /// File to export to (will overwrite)
    #[arg(long = "out", value_name = "FILE")]
    pub output: PathBuf,

    /// Order of the swatches when exporting a png
    #[arg(long, value_enum)]
    pub sort_png: Option<SortKey>,

    /// Palette to read from a JSON document (starting from 0)
    #[arg(long)]
    pub json_palette_index: Option<usize>,

    /// Origin URL recorded when converting an .aco file
    #[arg(long)]
    pub source_url: Option<String>,
}

pub fn run(args: ConvertArgs, config: Option<&Path>, printer: &Printer) -> Result<()> {
    let (manifest, manifest_path) = Manifest::locate(config, Path::new("."))?;
    if let Some(path) = &manifest_path {
        printer.info("Config", &display_path(path));
    }

    let in_kind = FileKind::input(&args.input)?;
    let out_kind = FileKind::output(&args.output)?;

    printer.status(
        "Converting",
        &format!(
            "{} -> {}",
            display_path(&args.input),
            display_path(&args.output)
        ),
    );

    let mut palette = match in_kind {
        FileKind::Aco => read_aco(&args, &manifest)?,
        _ => read_json(&args, &manifest)?,
    };

    printer.info(
        "Parsed",
        &format!(
            "{}, {}, {}",
            plural(palette.len(), "colour", "colours"),
            plural(palette.gradients.len(), "gradient", "gradients"),
            plural(palette.dither_pairs.len(), "dither pair", "dither pairs"),
        ),
    );

    match out_kind {
        FileKind::Json => {
            palette.add_full_palette_gradients()?;
            write_text(&args.output, &to_json(std::slice::from_ref(&palette))?)?;
        }
        FileKind::Gpl => {
            let translucent = palette
                .swatches
                .iter()
                .filter(|swatch| swatch.colour.a < 1.0)
                .count();
            if translucent > 0 {
                printer.warning(
                    "Dropping",
                    &format!(
                        "alpha of {}",
                        plural(translucent, "translucent colour", "translucent colours")
                    ),
                );
            }
            write_text(&args.output, &to_gpl(&palette))?
        }
        _ => {
            let order = match args.sort_png.or(manifest.sort_png) {
                Some(key) => {
                    printer.info("Sorting", &format!("by {}", key.gradient_name()));
                    palette.sorted_order(key)
                }
                None => palette.identity_order(),
            };
            write_png(&palette, &order, &args.output)?;
        }
    }

    printer.success("Finished", &display_path(&args.output));
    Ok(())
}

fn read_aco(args: &ConvertArgs, manifest: &Manifest) -> Result<Palette> {
    let bytes = fs::read(&args.input).map_err(|e| PaletteToolError::Io {
        path: args.input.clone(),
        message: format!("Failed to read swatches: {}", e),
    })?;

    let options = AcoOptions {
        source_url: args.source_url.clone().or_else(|| manifest.source_url.clone()),
        timestamp: None,
    };
    decode_aco(&bytes, &options).map_err(|e| PaletteToolError::binary(&args.input, e))
}

fn read_json(args: &ConvertArgs, manifest: &Manifest) -> Result<Palette> {
    let source = fs::read_to_string(&args.input).map_err(|e| PaletteToolError::Io {
        path: args.input.clone(),
        message: format!("Failed to read palette: {}", e),
    })?;

    let index = args.json_palette_index.unwrap_or(manifest.json_palette_index);
    let result = parse_palette_document(&source, index, manifest.max_tokens);
    let palette = result
        .map_err(|e| PaletteToolError::document(display_path(&args.input), source, e))?;

    if palette.is_empty() {
        return Err(PaletteToolError::Validation {
            message: format!("{} has no colors", display_path(&args.input)),
            help: Some("Add at least one entry to \"colors\"".to_string()),
        });
    }
    Ok(palette)
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| PaletteToolError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write palette: {}", e),
    })
}
