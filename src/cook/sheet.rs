//! Sheet data document types.
//!
//! TexturePacker's `json-array` data format is the substrate for both
//! spritesheets and object sheets. Only the fields the cooker touches are
//! modelled; everything else rides along untouched through a flattened map
//! so the tool can evolve its output without breaking the pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A packed sheet's data file.
#[derive(Debug, Deserialize, Serialize)]
pub struct SheetDoc {
    pub frames: Vec<SheetFrame>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub animations: Option<BTreeMap<String, Animation>>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// One packed frame.
#[derive(Debug, Deserialize, Serialize)]
pub struct SheetFrame {
    pub filename: String,
    /// Trimmed region of the source image; the x/y offset is what trimming
    /// cut away from the top-left.
    #[serde(rename = "spriteSourceSize")]
    pub sprite_source_size: SheetRect,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub objects: Option<Vec<crate::tiled::Object>>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// A rectangle in sheet data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SheetRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A named animation attached to a sheet.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Animation {
    pub frames: Vec<AnimationFrame>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// One step of an animation, keyed by packed frame name.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimationFrame {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration: Option<f64>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}
