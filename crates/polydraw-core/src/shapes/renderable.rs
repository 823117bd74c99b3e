//! Renderable scene nodes.

use super::{MarkerStyle, NodeId, PolygonStyle};
use kurbo::{Affine, BezPath, Circle, Point, Shape as KurboShape, Vec2};
use peniko::Color;
use uuid::Uuid;

/// Fill + outline geometry for a polygon, positioned as one unit.
///
/// The paths are built once and never rebuilt; moving the renderable only
/// changes its translation.
#[derive(Debug, Clone)]
pub struct Renderable {
    id: NodeId,
    fill: BezPath,
    outline: BezPath,
    fill_color: Color,
    outline_color: Color,
    outline_width: f64,
    position: Vec2,
}

impl Renderable {
    /// Build the renderable for a closed polygon through `points`.
    pub fn polygon(points: &[Point], style: &PolygonStyle) -> Self {
        let path = closed_path(points);
        Self {
            id: Uuid::new_v4(),
            outline: path.clone(),
            fill: path,
            fill_color: style.fill_color,
            outline_color: style.outline_color,
            outline_width: style.outline_width,
            position: Vec2::ZERO,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn fill(&self) -> &BezPath {
        &self.fill
    }

    pub fn outline(&self) -> &BezPath {
        &self.outline
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn outline_color(&self) -> Color {
        self.outline_color
    }

    pub fn outline_width(&self) -> f64 {
        self.outline_width
    }

    /// Current translation of the whole group.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the group so its local origin sits at `position`.
    pub fn set_position(&mut self, position: Point) {
        self.position = position.to_vec2();
    }

    /// Transform from local geometry to world coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.position)
    }
}

/// A dot marking a pending vertex.
#[derive(Debug, Clone)]
pub struct VertexMarker {
    id: NodeId,
    /// Marker centre in world coordinates.
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

impl VertexMarker {
    pub fn new(center: Point, style: &MarkerStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius: style.radius,
            color: style.color,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn to_path(&self) -> BezPath {
        Circle::new(self.center, self.radius).to_path(0.1)
    }
}

/// Closed path visiting `points` in order and returning to the first.
fn closed_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    path.line_to(*first);
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    fn triangle() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
    }

    #[test]
    fn test_outline_is_closed() {
        let renderable = Renderable::polygon(&triangle(), &PolygonStyle::default());
        let elements = renderable.outline().elements();
        assert_eq!(elements.first(), Some(&PathEl::MoveTo(Point::new(0.0, 0.0))));
        assert_eq!(elements[elements.len() - 2], PathEl::LineTo(Point::new(0.0, 0.0)));
        assert_eq!(elements.last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn test_fill_and_outline_share_boundary() {
        let renderable = Renderable::polygon(&triangle(), &PolygonStyle::default());
        assert_eq!(renderable.fill().elements(), renderable.outline().elements());
    }

    #[test]
    fn test_style_is_applied() {
        let style = PolygonStyle::default();
        let renderable = Renderable::polygon(&triangle(), &style);
        assert_eq!(renderable.fill_color(), style.fill_color);
        assert_eq!(renderable.outline_color(), style.outline_color);
        assert!((renderable.outline_width() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_position_moves_transform_not_geometry() {
        let mut renderable = Renderable::polygon(&triangle(), &PolygonStyle::default());
        let before = renderable.fill().clone();
        renderable.set_position(Point::new(5.0, -5.0));

        assert_eq!(renderable.fill().elements(), before.elements());
        assert_eq!(renderable.position(), Vec2::new(5.0, -5.0));
        let placed = renderable.transform() * Point::new(10.0, 10.0);
        assert!((placed.x - 15.0).abs() < f64::EPSILON);
        assert!((placed.y - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_points_build_empty_path() {
        let renderable = Renderable::polygon(&[], &PolygonStyle::default());
        assert!(renderable.fill().elements().is_empty());
    }

    #[test]
    fn test_marker_uses_style() {
        let marker = VertexMarker::new(Point::new(1.0, 2.0), &MarkerStyle::default());
        assert!((marker.radius - 3.0).abs() < f64::EPSILON);
        assert_eq!(marker.center, Point::new(1.0, 2.0));
        assert!(!marker.to_path().elements().is_empty());
    }
}
