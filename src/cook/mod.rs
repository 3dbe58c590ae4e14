//! Per-kind asset cookers.
//!
//! Each cooker turns one source file into one artifact under the export
//! tree, leaning on the external tools for format conversion and packing and
//! keeping the normalization itself pure. The export tree layout is fixed:
//!
//! ```text
//! export/
//!   images/        packed textures and tileset sheets
//!   spritesheets/  sheet data files (frames, animations, objects)
//!   tilesets/      normalized tileset documents
//!   tilemaps/      normalized map documents
//! ```

pub mod animation;
pub mod objectsheet;
pub mod sheet;
pub mod tilemap;
pub mod tileset;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CookError, Result};

/// Packed textures.
pub const IMAGE_DIR: &str = "images";
/// Sheet data files.
pub const SPRITESHEET_DIR: &str = "spritesheets";
/// Normalized tilesets.
pub const TILESET_DIR: &str = "tilesets";
/// Normalized maps.
pub const TILEMAP_DIR: &str = "tilemaps";

/// File stem with the `.tileset` marker extension stripped, so
/// `terrain.tileset.json` and `terrain.tsx` cook to the same artifact name.
pub fn asset_stem(path: &Path) -> String {
    let stem = crate::freshness::file_stem(path);
    match stem.strip_suffix(".tileset") {
        Some(stripped) => stripped.to_string(),
        None => stem,
    }
}

/// Read and deserialize a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| CookError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| CookError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Serialize a document as pretty JSON with a trailing newline.
pub fn write_pretty_json<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let mut contents = serde_json::to_string_pretty(document).map_err(|e| CookError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    contents.push('\n');

    fs::write(path, contents).map_err(|e| CookError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
