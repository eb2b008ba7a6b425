//! Palette exporters: JSON documents, GIMP palettes and PNG swatch strips.

mod gpl;
mod json;
mod png;

pub use gpl::to_gpl;
pub use json::to_json;
pub use png::{render_strip, write_png};
