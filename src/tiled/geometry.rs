//! Object shape classification and canonicalization.
//!
//! Tiled discriminates object shapes by field presence; the engine wants an
//! explicit tagged variant per shape with one coordinate convention:
//! circles store their centroid, rectangles become 4-vertex polygons
//! anchored bottom-left, polygon vertices stay relative to the object's own
//! anchor. Rotation is applied around the local origin, never around an
//! external center.

use serde::{Deserialize, Serialize};

use crate::error::{CookError, Result};

use super::gid::FLIP_MASK;
use super::property::{normalize_properties, Property};
use super::raw::RawObject;

/// Upper bound the engine's collision code supports.
pub const MAX_POLYGON_VERTICES: usize = 8;

/// A 2D point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// Canonical object shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// A placed tile image. The GID is stored without flip bits and is
    /// rewritten to a tileset-local index by the tilemap cooker.
    Sprite {
        gid: u32,
        width: f64,
        height: f64,
        rotation: f64,
    },
    Circle {
        radius: f64,
    },
    /// Vertices relative to the object position, at most
    /// [`MAX_POLYGON_VERTICES`].
    Polygon {
        vertices: Vec<Vec2>,
    },
    Point,
}

/// A normalized free-form object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub class: Option<String>,
    pub x: f64,
    pub y: f64,
    pub visible: bool,
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub properties: Option<Vec<Property>>,
}

/// Rotate a point around the local origin by `degrees`.
pub fn rotate_point(degrees: f64, p: Vec2) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2 {
        x: cos * p.x - sin * p.y,
        y: sin * p.x + cos * p.y,
    }
}

/// Classify and canonicalize a raw object. Deterministic, no IO.
///
/// Dispatch precedence: gid > ellipse > polygon > polyline > point > text >
/// rectangle (default). Polylines and text are unsupported; an ellipse must
/// be circular; polygons are capped at [`MAX_POLYGON_VERTICES`]. Raw-only
/// fields consumed during classification (rotation, width, height, the
/// discriminator itself) do not appear on the result.
pub fn normalize_object(raw: RawObject) -> Result<Object> {
    let RawObject {
        id,
        name,
        class,
        x,
        y,
        width,
        height,
        rotation,
        visible,
        gid,
        ellipse,
        polygon,
        polyline,
        point,
        text,
        properties,
        propertytypes,
    } = raw;

    let properties = normalize_properties(properties, propertytypes)?;

    let (x, y, shape) = if let Some(gid) = gid {
        (
            x,
            y,
            Shape::Sprite {
                gid: gid & !FLIP_MASK,
                width,
                height,
                rotation,
            },
        )
    } else if ellipse {
        if width != height {
            return Err(CookError::ShapeMismatch { width, height });
        }
        let radius = width / 2.0;
        // editor position is the top-left of the bounding box; store the
        // centroid instead
        (x + radius, y + radius, Shape::Circle { radius })
    } else if let Some(vertices) = polygon {
        if vertices.len() > MAX_POLYGON_VERTICES {
            return Err(CookError::TooManyVertices {
                count: vertices.len(),
            });
        }
        let vertices = vertices
            .into_iter()
            .map(|p| rotate_point(rotation, Vec2 { x: p.x, y: p.y }))
            .collect();
        (x, y, Shape::Polygon { vertices })
    } else if polyline.is_some() {
        return Err(CookError::UnsupportedShape { kind: "polyline" });
    } else if point {
        (x, y, Shape::Point)
    } else if text.is_some() {
        return Err(CookError::UnsupportedShape { kind: "text" });
    } else {
        // plain rectangle: the four (0|w, 0|h) corners around the local
        // origin, anchored bottom-left afterwards
        let corners = [
            Vec2 { x: 0.0, y: 0.0 },
            Vec2 { x: width, y: 0.0 },
            Vec2 { x: 0.0, y: height },
            Vec2 {
                x: width,
                y: height,
            },
        ];
        let vertices = corners.iter().map(|&p| rotate_point(rotation, p)).collect();
        (x, y + height, Shape::Polygon { vertices })
    };

    Ok(Object {
        id,
        name,
        class,
        x,
        y,
        visible,
        shape,
        properties,
    })
}
