//! Raw serde types for Tiled's JSON export schema.
//!
//! These structs mirror the editor's on-disk format and exist only as the
//! input side of normalization; the canonical output types live next to each
//! cooker. Fields the engine never consumes (layer `x`/`y`, `tiledversion`,
//! `nextobjectid`, ...) are simply not modelled and fall away on read.

use serde::Deserialize;
use serde_json::{Map, Value};

fn default_opacity() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

fn default_render_order() -> String {
    "right-down".to_string()
}

/// A map document (`.tmx` exported to JSON).
#[derive(Debug, Deserialize)]
pub struct RawMap {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub orientation: Option<String>,
    #[serde(default)]
    pub infinite: bool,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
    pub tilewidth: i64,
    pub tileheight: i64,
    #[serde(default = "default_render_order")]
    pub renderorder: String,
    #[serde(default)]
    pub layers: Vec<RawLayer>,
    #[serde(default)]
    pub tilesets: Vec<RawTilesetRef>,
    #[serde(default)]
    pub properties: Option<Value>,
    #[serde(default)]
    pub propertytypes: Option<Map<String, Value>>,
}

/// Reference from a map to one of its tilesets, ordered by `firstgid`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTilesetRef {
    pub firstgid: u32,
    pub source: String,
}

/// A map layer. Image and group layers are not part of the engine's layer
/// model and fail deserialization.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum RawLayer {
    #[serde(rename = "tilelayer")]
    Tile(RawTileLayer),
    #[serde(rename = "objectgroup")]
    Object(RawObjectLayer),
}

impl RawLayer {
    pub fn name(&self) -> &str {
        match self {
            RawLayer::Tile(layer) => &layer.name,
            RawLayer::Object(layer) => &layer.name,
        }
    }
}

/// A tile layer: dense `data` for finite maps, sparse `chunks` for infinite.
#[derive(Debug, Deserialize)]
pub struct RawTileLayer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub startx: i64,
    #[serde(default)]
    pub starty: i64,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub data: Option<Vec<u32>>,
    #[serde(default)]
    pub chunks: Option<Vec<RawChunk>>,
    #[serde(default)]
    pub properties: Option<Value>,
    #[serde(default)]
    pub propertytypes: Option<Map<String, Value>>,
}

/// One fixed-size rectangle of an infinite layer's sparse grid.
#[derive(Debug, Clone, Deserialize)]
pub struct RawChunk {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub data: Vec<u32>,
}

/// An object layer.
#[derive(Debug, Deserialize)]
pub struct RawObjectLayer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub draworder: Option<String>,
    #[serde(default)]
    pub objects: Vec<RawObject>,
    #[serde(default)]
    pub properties: Option<Value>,
    #[serde(default)]
    pub propertytypes: Option<Map<String, Value>>,
}

/// A free-form object before shape classification.
///
/// The shape is discriminated by field presence; see
/// [`crate::tiled::geometry::normalize_object`] for the precedence order.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObject {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub class: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub gid: Option<u32>,
    #[serde(default)]
    pub ellipse: bool,
    #[serde(default)]
    pub polygon: Option<Vec<RawPoint>>,
    #[serde(default)]
    pub polyline: Option<Vec<RawPoint>>,
    #[serde(default)]
    pub point: bool,
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub properties: Option<Value>,
    #[serde(default)]
    pub propertytypes: Option<Map<String, Value>>,
}

/// A vertex of a polygon or polyline, relative to the owning object.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}

/// A tileset document (`.tsx` exported to JSON, or authored as JSON).
///
/// Single-image tilesets carry `image`; image collections ("object sheets")
/// instead carry per-tile images under `tiles`.
#[derive(Debug, Deserialize)]
pub struct RawTileset {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub imagewidth: Option<i64>,
    #[serde(default)]
    pub imageheight: Option<i64>,
    #[serde(default)]
    pub tilewidth: Option<i64>,
    #[serde(default)]
    pub tileheight: Option<i64>,
    #[serde(default)]
    pub tilecount: Option<u32>,
    #[serde(default)]
    pub columns: Option<u32>,
    #[serde(default)]
    pub spacing: Option<i64>,
    #[serde(default)]
    pub margin: Option<i64>,
    #[serde(default)]
    pub tiles: Vec<RawTile>,
    #[serde(default)]
    pub properties: Option<Value>,
    #[serde(default)]
    pub propertytypes: Option<Map<String, Value>>,
}

/// Per-tile metadata inside a tileset; for image collections each tile has
/// its own image and optionally a group of collision objects.
#[derive(Debug, Deserialize)]
pub struct RawTile {
    pub id: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub objectgroup: Option<RawObjectLayer>,
}
