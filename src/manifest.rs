//! Tool configuration (palettetool.yaml) parsing.
//!
//! Every field is optional. Command-line flags take precedence over values
//! loaded from the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PaletteToolError, Result};
use crate::parser::DEFAULT_MAX_TOKENS;
use crate::types::SortKey;

/// Default configuration filename, looked up in the working directory.
pub const MANIFEST_FILENAME: &str = "palettetool.yaml";

/// Configuration loaded from palettetool.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Token budget for one JSON document.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Palette to read from multi-palette JSON documents.
    pub json_palette_index: usize,

    /// Sort applied to PNG swatch strips.
    pub sort_png: Option<SortKey>,

    /// Recorded as the origin of converted `.aco` files.
    pub source_url: Option<String>,
}

fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            json_palette_index: 0,
            sort_png: None,
            source_url: None,
        }
    }
}

impl Manifest {
    /// Load manifest from a palettetool.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PaletteToolError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PaletteToolError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Load `explicit` if given, else `palettetool.yaml` in `dir` if it
    /// exists, else the defaults. Returns the path that was read.
    pub fn locate(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let path = dir.join(MANIFEST_FILENAME);
        if path.is_file() {
            return Ok((Self::load(&path)?, Some(path)));
        }

        Ok((Self::default(), None))
    }

    /// Render as YAML, with every field spelled out.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| PaletteToolError::Export {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }
}
