//! Supported file kinds and the `formats` command.

use std::fmt;
use std::path::Path;

use clap::Args;

use crate::error::{PaletteToolError, Result};

/// A palette file format, identified by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Aco,
    Json,
    Png,
    Gpl,
}

impl FileKind {
    pub const INPUTS: [FileKind; 2] = [FileKind::Aco, FileKind::Json];
    pub const OUTPUTS: [FileKind; 3] = [FileKind::Json, FileKind::Png, FileKind::Gpl];

    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Aco => "aco",
            FileKind::Json => "json",
            FileKind::Png => "png",
            FileKind::Gpl => "gpl",
        }
    }

    /// Identify a file by its extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        [FileKind::Aco, FileKind::Json, FileKind::Png, FileKind::Gpl]
            .into_iter()
            .find(|kind| kind.extension() == ext)
    }

    /// The kind of an input file, if it can be read.
    pub fn input(path: &Path) -> Result<Self> {
        Self::from_path(path)
            .filter(|kind| Self::INPUTS.contains(kind))
            .ok_or_else(|| unsupported("input", path, &Self::INPUTS))
    }

    /// The kind of an output file, if it can be written.
    pub fn output(path: &Path) -> Result<Self> {
        Self::from_path(path)
            .filter(|kind| Self::OUTPUTS.contains(kind))
            .ok_or_else(|| unsupported("output", path, &Self::OUTPUTS))
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

fn unsupported(direction: &str, path: &Path, supported: &[FileKind]) -> PaletteToolError {
    let list: Vec<String> = supported.iter().map(FileKind::to_string).collect();
    PaletteToolError::Usage {
        message: format!("Unsupported {} kind: {}", direction, path.display()),
        help: Some(format!("Supported {} formats: {}", direction, list.join(", "))),
    }
}

/// List supported input and output formats
#[derive(Args, Debug)]
pub struct FormatsArgs {}

/// The `formats` listing.
pub fn listing() -> String {
    let mut out = String::from("supported input formats:\n");
    for kind in FileKind::INPUTS {
        out.push_str(&format!(" - {}\n", kind));
    }
    out.push_str("\nsupported output formats:\n");
    for kind in FileKind::OUTPUTS {
        out.push_str(&format!(" - {}\n", kind));
    }
    out
}

pub fn run(_args: FormatsArgs) -> Result<()> {
    print!("{}", listing());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(FileKind::from_path(Path::new("a/b.aco")), Some(FileKind::Aco));
        assert_eq!(FileKind::from_path(Path::new("SUNSET.JSON")), Some(FileKind::Json));
        assert_eq!(FileKind::from_path(Path::new("strip.Png")), Some(FileKind::Png));
        assert_eq!(FileKind::from_path(Path::new("palette.txt")), None);
        assert_eq!(FileKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_direction() {
        assert!(FileKind::input(Path::new("a.png")).is_err());
        assert!(FileKind::output(Path::new("a.aco")).is_err());
        assert_eq!(FileKind::output(Path::new("a.gpl")).unwrap(), FileKind::Gpl);
    }

    #[test]
    fn test_listing() {
        insta::assert_snapshot!(listing().trim_end(), @r###"
        supported input formats:
         - .aco
         - .json

        supported output formats:
         - .json
         - .png
         - .gpl
        "###);
    }
}
