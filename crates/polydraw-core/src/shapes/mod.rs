//! Shape definitions for the drawing scene.

mod polygon;
mod renderable;

pub use polygon::Shape;
pub use renderable::{Renderable, VertexMarker};

use peniko::Color;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Identifier of a node in the scene graph.
pub type NodeId = Uuid;

/// Presentation attributes shared by every polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    /// Fill color of the polygon interior.
    pub fill_color: Color,
    /// Color of the closed outline.
    pub outline_color: Color,
    /// Outline width in world units.
    pub outline_width: f64,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::from_rgba8(0xFF, 0xE9, 0x33, 255),
            outline_color: Color::from_rgba8(0, 0, 0, 255),
            outline_width: 4.0,
        }
    }
}

/// Presentation attributes for pending vertex markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub radius: f64,
    pub color: Color,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 3.0,
            color: Color::from_rgba8(0xFF, 0x58, 0x33, 255),
        }
    }
}
