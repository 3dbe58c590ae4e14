//! Normalization core for Tiled documents.
//!
//! Everything in this module is pure: raw export documents (as written by
//! `tiled --export-map json` / `--export-tileset json`) go in, canonical
//! engine values come out. File IO and tool invocation live in
//! [`crate::cook`] and [`crate::tools`].

pub mod geometry;
pub mod gid;
pub mod grid;
pub mod property;
pub mod raw;

pub use geometry::{normalize_object, Object, Shape, Vec2, MAX_POLYGON_VERTICES};
pub use gid::{gid_range, resolve_tileset, rewrite_local, FLIP_MASK};
pub use grid::{build_grid, Grid, GridPos, Size};
pub use property::{normalize_properties, Property};
pub use raw::{
    RawChunk, RawLayer, RawMap, RawObject, RawObjectLayer, RawPoint, RawTile, RawTileLayer,
    RawTileset, RawTilesetRef,
};
