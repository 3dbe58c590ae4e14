//! cooker - Game asset build pipeline
//!
//! A library for driving external editing tools (Tiled, TexturePacker) to
//! turn authoring-format sources into a normalized, engine-ready JSON/image
//! asset tree, with filesystem-timestamp staleness tracking so only changed
//! inputs are reprocessed.

pub mod cli;
pub mod cook;
pub mod discovery;
pub mod error;
pub mod freshness;
pub mod manifest;
pub mod output;
pub mod tiled;
pub mod tools;

pub use discovery::{detect_asset_kind, scan_directory, AssetKind, ScanResult};
pub use error::{CookError, Result};
pub use freshness::is_stale;
pub use manifest::Manifest;
pub use tiled::{
    build_grid, gid_range, normalize_object, normalize_properties, resolve_tileset, Grid, Object,
    Property, Shape,
};
