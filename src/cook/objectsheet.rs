//! Objectsheet cooker (image-collection tilesets).
//!
//! An objectsheet is a `.tsx` tileset whose tiles are independent images,
//! each optionally carrying collision objects. The cooker exports the
//! tileset through the editor, normalizes every tile's collision geometry,
//! has the packer merge the tile images into one sheet, then splices each
//! tile's object list into the matching packed frame. Because the packer
//! trims transparent margins, object coordinates are shifted by the frame's
//! trim offset so geometry stays aligned with the visible pixels.

use std::path::{Path, PathBuf};

use crate::error::{CookError, Result};
use crate::freshness::{ensure_subdir, existing_dir, existing_file, file_stem, remove_file_retry};
use crate::tiled::{normalize_object, Object, RawTileset};
use crate::tools::{PackRequest, TexturePackerCli, TiledCli};

use super::sheet::SheetDoc;
use super::{read_json, write_pretty_json, IMAGE_DIR, SPRITESHEET_DIR};

/// One tile of an image collection, ready to pack and merge.
#[derive(Debug)]
pub struct TileDef {
    /// Local tile id; becomes the frame's `index`.
    pub index: u32,
    /// Tile image path as written in the tileset, relative to its directory.
    pub image: PathBuf,
    /// Normalized collision objects, if the tile has any.
    pub objects: Option<Vec<Object>>,
}

/// Export and parse an objectsheet `.tsx`, normalizing per-tile geometry.
///
/// Returns the tile definitions sorted by tile id.
pub fn parse_tileset(source: &Path, scratch_dir: &Path, tiled: &TiledCli) -> Result<Vec<TileDef>> {
    let exported = scratch_dir.join(format!("{}.export.json", file_stem(source)));
    tiled.export_tileset(source, &exported)?;
    let raw: RawTileset = read_json(&exported)?;
    remove_file_retry(&exported)?;

    if raw.kind != "tileset" {
        return Err(CookError::InvalidDocumentFormat {
            expected: "tileset",
            found: raw.kind,
        });
    }
    if raw.image.is_some() {
        return Err(CookError::InvalidDocumentFormat {
            expected: "image collection tileset",
            found: "single-image tileset".to_string(),
        });
    }

    let mut defs = Vec::with_capacity(raw.tiles.len());
    for tile in raw.tiles {
        let Some(image) = tile.image else {
            return Err(CookError::Parse {
                path: source.to_path_buf(),
                message: format!("tile {} has no image", tile.id),
            });
        };

        let objects = match tile.objectgroup {
            Some(group) => {
                let mut objects = Vec::with_capacity(group.objects.len());
                for object in group.objects {
                    objects.push(normalize_object(object)?);
                }
                Some(objects)
            }
            None => None,
        };

        defs.push(TileDef {
            index: tile.id,
            image: PathBuf::from(image),
            objects,
        });
    }

    defs.sort_by_key(|def| def.index);
    Ok(defs)
}

/// Splice tile definitions into a packed sheet's frames.
///
/// Frames match their tile by packed name against the tile image's stem.
/// Matched frames get the tile's `index` and its objects, shifted left/up by
/// the trim offset. Frames without a tile (and tiles without a frame) are
/// left alone.
pub fn merge_tile_defs(document: &mut SheetDoc, defs: &[TileDef]) {
    document
        .meta
        .insert("sheet_type".to_string(), "objectsheet".into());

    for frame in &mut document.frames {
        let Some(def) = defs.iter().find(|def| {
            let stem = file_stem(&def.image);
            frame.filename == stem || frame.filename.ends_with(&format!("/{}", stem))
        }) else {
            continue;
        };

        frame.index = Some(def.index);
        frame.objects = def.objects.as_ref().map(|objects| {
            objects
                .iter()
                .cloned()
                .map(|mut object| {
                    object.x -= frame.sprite_source_size.x;
                    object.y -= frame.sprite_source_size.y;
                    object
                })
                .collect()
        });
    }
}

/// Cook one `.tsx` objectsheet into `export/spritesheets/<stem>.json` plus a
/// packed texture under `export/images/`.
pub fn cook(
    source: &Path,
    export_dir: &Path,
    tiled: &TiledCli,
    packer: &TexturePackerCli,
) -> Result<PathBuf> {
    existing_file(source)?;
    existing_dir(export_dir)?;
    let image_dir = ensure_subdir(export_dir, IMAGE_DIR)?;
    let sheet_dir = ensure_subdir(export_dir, SPRITESHEET_DIR)?;

    let defs = parse_tileset(source, &sheet_dir, tiled)?;
    let source_dir = source.parent().unwrap_or_else(|| Path::new("."));
    let stem = file_stem(source);

    let mut inputs: Vec<PathBuf> = defs.iter().map(|def| source_dir.join(&def.image)).collect();
    // a sibling packer project contributes extra frames to the same sheet
    let project = source_dir.join(format!("{}.tps", stem));
    if project.is_file() {
        inputs.push(project);
    }

    let data = sheet_dir.join(format!("{}.json", stem));
    packer.pack(&PackRequest {
        sheet: image_dir.join(format!("{}.png", stem)),
        data: data.clone(),
        texture_path: format!("../{}", IMAGE_DIR),
        flatten_names: false,
        inputs,
    })?;

    let mut document: SheetDoc = read_json(&data)?;
    merge_tile_defs(&mut document, &defs);
    write_pretty_json(&data, &document)?;
    Ok(data)
}
