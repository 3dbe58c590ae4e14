//! Global grid unification.
//!
//! Infinite maps store each layer as a sparse set of chunks with no obvious
//! global extent, which makes camera culling awkward at runtime. The cooker
//! coalesces every tile layer's region into one shared grid per map; finite
//! maps get the same representation with a single implicit chunk. The grid
//! replaces the map's flat `width`/`height`/`tilewidth`/`tileheight`/
//! `renderorder` fields.

use serde::{Deserialize, Serialize};

use crate::error::{CookError, Result};

use super::raw::{RawLayer, RawMap};

/// A position in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i64,
    pub y: i64,
}

/// A width/height pair, in cells or pixels depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: i64,
    pub height: i64,
}

/// The unified grid shared by all tile layers of one map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub render_order: String,
    /// Top-left corner, in cells.
    pub origin: GridPos,
    /// Extent from the origin, in cells.
    pub size: Size,
    /// Cell size in pixels.
    pub cell_size: Size,
    /// Chunk size in cells; equals `size` for finite maps.
    pub chunk_size: Size,
}

/// Compute the unified grid for a map.
///
/// Finite maps use the map extent as a single chunk. Infinite maps take the
/// union of every tile layer's chunk region; all chunks across all layers
/// must agree on one chunk size or the map is rejected with
/// [`CookError::ChunkSizeMismatch`].
pub fn build_grid(map: &RawMap) -> Result<Grid> {
    let (origin, size, chunk_size) = if map.infinite {
        unify_chunked_layers(map)?
    } else {
        (
            GridPos { x: 0, y: 0 },
            Size {
                width: map.width,
                height: map.height,
            },
            Size {
                width: map.width,
                height: map.height,
            },
        )
    };

    Ok(Grid {
        render_order: map.renderorder.clone(),
        origin,
        size,
        cell_size: Size {
            width: map.tilewidth,
            height: map.tileheight,
        },
        chunk_size,
    })
}

fn unify_chunked_layers(map: &RawMap) -> Result<(GridPos, Size, Size)> {
    let mut left = i64::MAX;
    let mut top = i64::MAX;
    let mut right = i64::MIN;
    let mut bottom = i64::MIN;
    let mut chunk_size: Option<(i64, i64)> = None;

    for layer in &map.layers {
        let RawLayer::Tile(layer) = layer else {
            continue;
        };
        let Some(chunks) = &layer.chunks else {
            continue;
        };

        left = left.min(layer.startx);
        top = top.min(layer.starty);
        right = right.max(layer.startx + layer.width);
        bottom = bottom.max(layer.starty + layer.height);

        for chunk in chunks {
            match chunk_size {
                None => chunk_size = Some((chunk.width, chunk.height)),
                Some(expected) if expected == (chunk.width, chunk.height) => {}
                Some(expected) => {
                    return Err(CookError::ChunkSizeMismatch {
                        expected,
                        found: (chunk.width, chunk.height),
                    });
                }
            }
        }
    }

    // a map with no chunked layers unifies to an empty grid at the origin
    if left == i64::MAX {
        return Ok((
            GridPos { x: 0, y: 0 },
            Size {
                width: 0,
                height: 0,
            },
            Size {
                width: 0,
                height: 0,
            },
        ));
    }

    let (chunk_width, chunk_height) = chunk_size.unwrap_or((0, 0));
    Ok((
        GridPos { x: left, y: top },
        Size {
            width: right - left,
            height: bottom - top,
        },
        Size {
            width: chunk_width,
            height: chunk_height,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: serde_json::Value) -> RawMap {
        serde_json::from_value(value).unwrap()
    }

    fn chunk(x: i64, y: i64, w: i64, h: i64) -> serde_json::Value {
        json!({ "x": x, "y": y, "width": w, "height": h, "data": [0, 0, 0, 0] })
    }

    #[test]
    fn test_finite_map_is_one_chunk() {
        let grid = build_grid(&map(json!({
            "type": "map",
            "width": 30, "height": 20,
            "tilewidth": 16, "tileheight": 16,
            "renderorder": "right-down",
        })))
        .unwrap();

        assert_eq!(grid.origin, GridPos { x: 0, y: 0 });
        assert_eq!(
            grid.size,
            Size {
                width: 30,
                height: 20
            }
        );
        assert_eq!(grid.chunk_size, grid.size);
        assert_eq!(
            grid.cell_size,
            Size {
                width: 16,
                height: 16
            }
        );
        assert_eq!(grid.render_order, "right-down");
    }

    #[test]
    fn test_infinite_map_unifies_layer_regions() {
        let grid = build_grid(&map(json!({
            "type": "map",
            "infinite": true,
            "tilewidth": 16, "tileheight": 16,
            "renderorder": "right-down",
            "layers": [
                {
                    "type": "tilelayer", "name": "bg",
                    "startx": -32, "starty": -16, "width": 64, "height": 32,
                    "chunks": [chunk(-32, -16, 16, 16)],
                },
                {
                    "type": "tilelayer", "name": "fg",
                    "startx": 0, "starty": 0, "width": 48, "height": 64,
                    "chunks": [chunk(0, 0, 16, 16)],
                },
            ],
        })))
        .unwrap();

        // origin is the min of each layer's start coordinates
        assert_eq!(grid.origin, GridPos { x: -32, y: -16 });
        // extent reaches the furthest layer edge, not just the first layer's
        assert_eq!(
            grid.size,
            Size {
                width: 80,
                height: 80
            }
        );
        assert_eq!(
            grid.chunk_size,
            Size {
                width: 16,
                height: 16
            }
        );
    }

    #[test]
    fn test_chunk_size_mismatch_across_layers() {
        let result = build_grid(&map(json!({
            "type": "map",
            "infinite": true,
            "tilewidth": 16, "tileheight": 16,
            "renderorder": "right-down",
            "layers": [
                {
                    "type": "tilelayer", "name": "bg",
                    "startx": 0, "starty": 0, "width": 16, "height": 16,
                    "chunks": [chunk(0, 0, 16, 16)],
                },
                {
                    "type": "tilelayer", "name": "fg",
                    "startx": 0, "starty": 0, "width": 32, "height": 32,
                    "chunks": [chunk(0, 0, 32, 32)],
                },
            ],
        })));

        assert!(matches!(
            result,
            Err(CookError::ChunkSizeMismatch {
                expected: (16, 16),
                found: (32, 32),
            })
        ));
    }

    #[test]
    fn test_object_layers_do_not_affect_grid() {
        let grid = build_grid(&map(json!({
            "type": "map",
            "infinite": true,
            "tilewidth": 8, "tileheight": 8,
            "renderorder": "right-down",
            "layers": [
                { "type": "objectgroup", "name": "actors", "objects": [] },
                {
                    "type": "tilelayer", "name": "bg",
                    "startx": 16, "starty": 16, "width": 16, "height": 16,
                    "chunks": [chunk(16, 16, 16, 16)],
                },
            ],
        })))
        .unwrap();

        assert_eq!(grid.origin, GridPos { x: 16, y: 16 });
    }

    #[test]
    fn test_infinite_map_without_chunks() {
        let grid = build_grid(&map(json!({
            "type": "map",
            "infinite": true,
            "tilewidth": 16, "tileheight": 16,
            "renderorder": "right-down",
            "layers": [
                { "type": "objectgroup", "name": "actors", "objects": [] },
            ],
        })))
        .unwrap();

        assert_eq!(grid.origin, GridPos { x: 0, y: 0 });
        assert_eq!(
            grid.size,
            Size {
                width: 0,
                height: 0
            }
        );
    }
}
