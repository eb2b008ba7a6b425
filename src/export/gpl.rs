//! GIMP palette (`.gpl`) output.

use std::fmt::Write;

use crate::types::Palette;

/// Render a palette in GIMP's text format. Alpha is dropped.
pub fn to_gpl(palette: &Palette) -> String {
    let title = if palette.title.is_empty() {
        "(untitled)"
    } else {
        palette.title.as_str()
    };

    let mut out = String::new();
    out.push_str("GIMP Palette\n");
    let _ = writeln!(out, "Name: {}", title);
    let _ = writeln!(out, "# generated by palettetool {}", env!("CARGO_PKG_VERSION"));

    for swatch in &palette.swatches {
        let [r, g, b, _] = swatch.colour.to_rgba8();
        let name = if swatch.name.is_empty() {
            "(unnamed)"
        } else {
            swatch.name.as_str()
        };
        let _ = writeln!(out, "{} {} {} {}", r, g, b, name);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, Swatch};

    #[test]
    fn test_gpl() {
        let mut palette = Palette::new("Sunset");
        palette.swatches = vec![
            Swatch::new("sky", Colour::new(0.25, 0.5, 1.0, 1.0)),
            Swatch::new("", Colour::new(1.0, 0.75, 0.0, 0.5)),
        ];

        let gpl = to_gpl(&palette);
        let lines: Vec<&str> = gpl.lines().collect();
        assert_eq!(lines[0], "GIMP Palette");
        assert_eq!(lines[1], "Name: Sunset");
        assert!(lines[2].starts_with("# generated by palettetool"));
        assert_eq!(&lines[3..], ["64 127 255 sky", "255 192 0 (unnamed)"]);
    }

    #[test]
    fn test_gpl_untitled() {
        insta::assert_snapshot!(to_gpl(&Palette::default()).lines().nth(1).unwrap(), @"Name: (untitled)");
    }
}
