//! Tilemap cooker.
//!
//! Exports a `.tmx` map to JSON through the editor, then normalizes the
//! document: root and layer properties are canonicalized, the global grid
//! replaces the flat dimension fields, every layer's GIDs are resolved to a
//! single tileset and rewritten to local 1-based indices, and tileset
//! references are repointed into the export tree. Optionally an external
//! object-type-definitions document is spliced in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CookError, Result};
use crate::freshness::{ensure_subdir, existing_dir, existing_file, file_stem, remove_file_retry};
use crate::tiled::{
    build_grid, gid_range, normalize_object, normalize_properties, resolve_tileset, rewrite_local,
    Grid, Object, Property, RawLayer, RawMap, RawObjectLayer, RawTileLayer, RawTilesetRef, Shape,
};
use crate::tools::TiledCli;

use super::{asset_stem, read_json, write_pretty_json, SPRITESHEET_DIR, TILEMAP_DIR, TILESET_DIR};

/// A normalized map document.
#[derive(Debug, Serialize, Deserialize)]
pub struct TilemapDoc {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub orientation: Option<String>,
    pub grid: Grid,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub properties: Option<Vec<Property>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub object_types: Option<Value>,
    pub layers: Vec<Layer>,
    pub tilesets: Vec<TilesetRef>,
}

/// A normalized layer.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Layer {
    #[serde(rename = "tilelayer")]
    Tile(TileLayer),
    #[serde(rename = "objectgroup")]
    Object(ObjectLayer),
}

/// A tile layer with locally-indexed cells.
#[derive(Debug, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<u32>,
    pub opacity: f64,
    pub visible: bool,
    /// Index into the map's `tilesets`; absent for empty layers.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tileset_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub chunks: Option<Vec<Chunk>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub properties: Option<Vec<Property>>,
}

/// One chunk of an infinite layer. Extent lives in the grid's `chunk_size`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Chunk {
    pub x: i64,
    pub y: i64,
    pub data: Vec<u32>,
}

/// An object layer with canonicalized objects.
#[derive(Debug, Serialize, Deserialize)]
pub struct ObjectLayer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<u32>,
    pub opacity: f64,
    pub visible: bool,
    /// Index into the map's `tilesets`; absent when no object is a sprite.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tileset_index: Option<usize>,
    pub objects: Vec<Object>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub properties: Option<Vec<Property>>,
}

/// A repointed tileset reference.
#[derive(Debug, Serialize, Deserialize)]
pub struct TilesetRef {
    pub first_gid: u32,
    pub source: String,
}

/// Normalize a raw map document. Deterministic, no IO.
pub fn normalize_map(raw: RawMap) -> Result<TilemapDoc> {
    if raw.kind != "map" {
        return Err(CookError::InvalidDocumentFormat {
            expected: "map",
            found: raw.kind,
        });
    }

    let grid = build_grid(&raw)?;
    let properties = normalize_properties(raw.properties, raw.propertytypes)?;

    let mut layers = Vec::with_capacity(raw.layers.len());
    for layer in raw.layers {
        layers.push(match layer {
            RawLayer::Tile(layer) => Layer::Tile(normalize_tile_layer(layer, &raw.tilesets)?),
            RawLayer::Object(layer) => {
                Layer::Object(normalize_object_layer(layer, &raw.tilesets)?)
            }
        });
    }

    let tilesets = raw
        .tilesets
        .into_iter()
        .map(|reference| TilesetRef {
            first_gid: reference.firstgid,
            source: rewrite_tileset_source(&reference.source),
        })
        .collect();

    Ok(TilemapDoc {
        kind: "map".to_string(),
        orientation: raw.orientation,
        grid,
        properties,
        object_types: None,
        layers,
        tilesets,
    })
}

fn normalize_tile_layer(layer: RawTileLayer, tilesets: &[RawTilesetRef]) -> Result<TileLayer> {
    let properties = normalize_properties(layer.properties, layer.propertytypes)?;

    let mut data = layer.data;
    let mut chunks: Option<Vec<Chunk>> = layer.chunks.map(|chunks| {
        chunks
            .into_iter()
            .map(|chunk| Chunk {
                x: chunk.x,
                y: chunk.y,
                data: chunk.data,
            })
            .collect()
    });

    // one GID range per layer: dense data or the aggregate over all chunks
    let range = match (&data, &chunks) {
        (Some(data), _) => gid_range(data.iter().copied()),
        (None, Some(chunks)) => gid_range(
            chunks
                .iter()
                .flat_map(|chunk| chunk.data.iter().copied()),
        ),
        (None, None) => None,
    };

    let resolved = resolve_tileset(tilesets, range, &layer.name)?;
    if let Some((_, first_gid)) = resolved {
        if let Some(data) = &mut data {
            rewrite_local(data, first_gid);
        }
        if let Some(chunks) = &mut chunks {
            for chunk in chunks {
                rewrite_local(&mut chunk.data, first_gid);
            }
        }
    }

    Ok(TileLayer {
        name: layer.name,
        id: layer.id,
        opacity: layer.opacity,
        visible: layer.visible,
        tileset_index: resolved.map(|(index, _)| index),
        data,
        chunks,
        properties,
    })
}

fn normalize_object_layer(
    layer: RawObjectLayer,
    tilesets: &[RawTilesetRef],
) -> Result<ObjectLayer> {
    let properties = normalize_properties(layer.properties, layer.propertytypes)?;

    let mut objects = Vec::with_capacity(layer.objects.len());
    for object in layer.objects {
        objects.push(normalize_object(object)?);
    }

    let range = gid_range(objects.iter().filter_map(|object| match object.shape {
        Shape::Sprite { gid, .. } => Some(gid),
        _ => None,
    }));

    let resolved = resolve_tileset(tilesets, range, &layer.name)?;
    if let Some((_, first_gid)) = resolved {
        for object in &mut objects {
            if let Shape::Sprite { gid, .. } = &mut object.shape {
                if *gid != 0 {
                    *gid -= first_gid - 1;
                }
            }
        }
    }

    Ok(ObjectLayer {
        name: layer.name,
        id: layer.id,
        opacity: layer.opacity,
        visible: layer.visible,
        tileset_index: resolved.map(|(index, _)| index),
        objects,
        properties,
    })
}

/// Repoint a tileset reference into the export tree.
///
/// Plain tilesets land under `tilesets/`, object-collection sheets under
/// `spritesheets/`; a source that matches neither convention passes through
/// unchanged.
fn rewrite_tileset_source(source: &str) -> String {
    let stem = asset_stem(Path::new(source));

    if source.contains("tilesets") {
        format!("../{}/{}.json", TILESET_DIR, stem)
    } else if source.contains("objects") {
        format!("../{}/{}.json", SPRITESHEET_DIR, stem)
    } else {
        source.to_string()
    }
}

/// Load the external object-type-definitions document named by a root
/// `object_types` property, resolved relative to the map's directory.
fn load_object_types(
    properties: Option<&[Property]>,
    map_dir: &Path,
) -> Result<Option<Value>> {
    let Some(property) = properties
        .unwrap_or_default()
        .iter()
        .find(|property| property.name == "object_types")
    else {
        return Ok(None);
    };

    if property.kind != "file" {
        return Err(CookError::InvalidObjectTypesProperty {
            found: property.kind.clone(),
        });
    }

    let path = map_dir.join(property.value.as_str().unwrap_or_default());
    let document = read_json(&path)?;
    Ok(Some(document))
}

/// Cook one `.tmx` map into `export/tilemaps/<stem>.json`.
pub fn cook(source: &Path, export_dir: &Path, tiled: &TiledCli) -> Result<PathBuf> {
    existing_file(source)?;
    existing_dir(export_dir)?;
    let out_dir = ensure_subdir(export_dir, TILEMAP_DIR)?;

    let stem = file_stem(source);
    let exported = out_dir.join(format!("{}.export.json", stem));
    tiled.export_map(source, &exported)?;
    let raw: RawMap = read_json(&exported)?;
    remove_file_retry(&exported)?;

    let mut document = normalize_map(raw)?;
    let map_dir = source.parent().unwrap_or_else(|| Path::new("."));
    let object_types = load_object_types(document.properties.as_deref(), map_dir)?;
    document.object_types = object_types;

    let output = out_dir.join(format!("{}.json", stem));
    write_pretty_json(&output, &document)?;
    Ok(output)
}
