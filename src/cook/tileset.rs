//! Tileset cooker (single-image tilesets).
//!
//! Tilesets are authored directly as JSON (`<name>.tileset.json`), so no
//! editor export is involved: the document is validated, its properties
//! normalized, the sheet image copied into `images/` and the image reference
//! repointed there. Image-collection tilesets belong to the objectsheet
//! cooker and are rejected here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CookError, Result};
use crate::freshness::{ensure_subdir, existing_dir, existing_file};
use crate::tiled::{normalize_properties, Property, RawTileset};

use super::{asset_stem, read_json, write_pretty_json, IMAGE_DIR, TILESET_DIR};

/// A normalized single-image tileset document.
#[derive(Debug, Serialize, Deserialize)]
pub struct TilesetDoc {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub imagewidth: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub imageheight: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tilewidth: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tileheight: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tilecount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub spacing: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub margin: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub properties: Option<Vec<Property>>,
}

/// Normalize a raw tileset document. Deterministic, no IO.
///
/// Returns the normalized document together with the original image
/// reference (still relative to the source file) so the caller can copy it.
pub fn normalize_tileset(raw: RawTileset) -> Result<(TilesetDoc, String)> {
    if raw.kind != "tileset" {
        return Err(CookError::InvalidDocumentFormat {
            expected: "tileset",
            found: raw.kind,
        });
    }

    let Some(image) = raw.image else {
        return Err(CookError::InvalidDocumentFormat {
            expected: "single-image tileset",
            found: "image collection tileset".to_string(),
        });
    };

    let properties = normalize_properties(raw.properties, raw.propertytypes)?;

    let image_name = Path::new(&image)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.clone());

    let document = TilesetDoc {
        kind: "tileset".to_string(),
        name: raw.name,
        image: format!("../{}/{}", IMAGE_DIR, image_name),
        imagewidth: raw.imagewidth,
        imageheight: raw.imageheight,
        tilewidth: raw.tilewidth,
        tileheight: raw.tileheight,
        tilecount: raw.tilecount,
        columns: raw.columns,
        spacing: raw.spacing,
        margin: raw.margin,
        properties,
    };

    Ok((document, image))
}

/// Cook one `<name>.tileset.json` into `export/tilesets/<name>.json`,
/// copying the sheet image into `export/images/`.
pub fn cook(source: &Path, export_dir: &Path) -> Result<PathBuf> {
    existing_file(source)?;
    existing_dir(export_dir)?;
    let out_dir = ensure_subdir(export_dir, TILESET_DIR)?;
    let image_dir = ensure_subdir(export_dir, IMAGE_DIR)?;

    let raw: RawTileset = read_json(source)?;
    let (document, image) = normalize_tileset(raw)?;

    let source_dir = source.parent().unwrap_or_else(|| Path::new("."));
    let image_source = source_dir.join(&image);
    existing_file(&image_source)?;
    let image_name = image_source
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&image));
    fs::copy(&image_source, image_dir.join(&image_name)).map_err(|e| CookError::Io {
        path: image_source.clone(),
        message: format!("failed to copy sheet image: {}", e),
    })?;

    let output = out_dir.join(format!("{}.json", asset_stem(source)));
    write_pretty_json(&output, &document)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tileset(value: serde_json::Value) -> RawTileset {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_rejects_non_tileset_document() {
        let result = normalize_tileset(tileset(json!({ "type": "map" })));

        assert!(matches!(
            result,
            Err(CookError::InvalidDocumentFormat { expected: "tileset", .. })
        ));
    }

    #[test]
    fn test_rejects_image_collection() {
        let result = normalize_tileset(tileset(json!({
            "type": "tileset",
            "name": "npcs",
            "tiles": [{ "id": 0, "image": "duck.png" }],
        })));

        assert!(matches!(
            result,
            Err(CookError::InvalidDocumentFormat {
                expected: "single-image tileset",
                ..
            })
        ));
    }

    #[test]
    fn test_image_repointed_into_export_tree() {
        let (document, image) = normalize_tileset(tileset(json!({
            "type": "tileset",
            "name": "terrain",
            "image": "../art/terrain.png",
            "tilewidth": 16, "tileheight": 16,
            "tilecount": 64, "columns": 8,
        })))
        .unwrap();

        assert_eq!(image, "../art/terrain.png");
        assert_eq!(document.image, "../images/terrain.png");
        assert_eq!(document.tilecount, Some(64));
    }

    #[test]
    fn test_cook_writes_document_and_copies_image() {
        let source_dir = tempfile::tempdir().unwrap();
        let export_dir = tempfile::tempdir().unwrap();

        std::fs::write(source_dir.path().join("terrain.png"), b"png").unwrap();
        let source = source_dir.path().join("terrain.tileset.json");
        write_pretty_json(
            &source,
            &json!({
                "type": "tileset",
                "name": "terrain",
                "image": "terrain.png",
                "tilewidth": 16, "tileheight": 16,
            }),
        )
        .unwrap();

        let output = cook(&source, export_dir.path()).unwrap();

        assert_eq!(output, export_dir.path().join("tilesets/terrain.json"));
        assert!(export_dir.path().join("images/terrain.png").is_file());

        let document: TilesetDoc = read_json(&output).unwrap();
        assert_eq!(document.image, "../images/terrain.png");
    }

    #[test]
    fn test_cook_missing_image_fails() {
        let source_dir = tempfile::tempdir().unwrap();
        let export_dir = tempfile::tempdir().unwrap();

        let source = source_dir.path().join("terrain.tileset.json");
        write_pretty_json(
            &source,
            &json!({ "type": "tileset", "name": "terrain", "image": "gone.png" }),
        )
        .unwrap();

        let result = cook(&source, export_dir.path());
        assert!(matches!(result, Err(CookError::MissingInput { .. })));
    }
}
