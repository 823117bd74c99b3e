//! Polygon shape.

use super::{PolygonStyle, Renderable, ShapeId};
use kurbo::Point;
use uuid::Uuid;

/// A closed polygon defined by an ordered vertex list.
///
/// `points` are fixed at construction. Placing a shape moves its renderable
/// only, so after a copy is dropped the points stay relative to the origin
/// while the rendered outline sits at the placement position.
#[derive(Debug)]
pub struct Shape {
    id: ShapeId,
    points: Vec<Point>,
    style: PolygonStyle,
    renderable: Renderable,
}

impl Shape {
    /// Create a polygon with the default style.
    ///
    /// Callers are expected to pass at least three points; degenerate input
    /// is not rejected.
    pub fn new(points: Vec<Point>) -> Self {
        Self::with_style(points, PolygonStyle::default())
    }

    /// Create a polygon with an explicit style.
    pub fn with_style(points: Vec<Point>, style: PolygonStyle) -> Self {
        let renderable = Renderable::polygon(&points, &style);
        Self {
            id: Uuid::new_v4(),
            points,
            style,
            renderable,
        }
    }

    /// Duplicate this shape with its own point list and freshly built renderable.
    pub fn copy(&self) -> Self {
        Self::with_style(self.points.clone(), self.style)
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn style(&self) -> &PolygonStyle {
        &self.style
    }

    pub fn renderable(&self) -> &Renderable {
        &self.renderable
    }

    pub fn renderable_mut(&mut self) -> &mut Renderable {
        &mut self.renderable
    }

    /// Points translated by the renderable's current position.
    pub fn placed_points(&self) -> Vec<Point> {
        let offset = self.renderable.position();
        self.points.iter().map(|p| *p + offset).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn points() -> Vec<Point> {
        vec![Point::new(1.0, 1.0), Point::new(2.0, 1.0), Point::new(2.0, 2.0)]
    }

    #[test]
    fn test_shape_creation() {
        let shape = Shape::new(points());
        assert_eq!(shape.points(), points().as_slice());
        assert_eq!(shape.renderable().position(), Vec2::ZERO);
    }

    #[test]
    fn test_copy_has_equal_points_and_new_identity() {
        let original = Shape::new(points());
        let copy = original.copy();

        assert_eq!(copy.points(), original.points());
        assert_ne!(copy.id(), original.id());
        assert_ne!(copy.renderable().id(), original.renderable().id());
    }

    #[test]
    fn test_moving_copy_leaves_original_in_place() {
        let original = Shape::new(points());
        let mut copy = original.copy();

        copy.renderable_mut().set_position(Point::new(50.0, -20.0));

        assert_eq!(original.renderable().position(), Vec2::ZERO);
        assert_eq!(copy.renderable().position(), Vec2::new(50.0, -20.0));
    }

    #[test]
    fn test_placement_does_not_touch_points() {
        let mut shape = Shape::new(points());
        shape.renderable_mut().set_position(Point::new(10.0, 10.0));

        assert_eq!(shape.points(), points().as_slice());
        assert_eq!(
            shape.placed_points(),
            vec![Point::new(11.0, 11.0), Point::new(12.0, 11.0), Point::new(12.0, 12.0)]
        );
    }

    #[test]
    fn test_copy_starts_at_origin() {
        let mut original = Shape::new(points());
        original.renderable_mut().set_position(Point::new(7.0, 7.0));
        let copy = original.copy();
        assert_eq!(copy.renderable().position(), Vec2::ZERO);
    }

    #[test]
    fn test_copy_keeps_style() {
        let style = PolygonStyle {
            outline_width: 1.5,
            ..PolygonStyle::default()
        };
        let original = Shape::with_style(points(), style);
        let copy = original.copy();
        assert!((copy.renderable().outline_width() - 1.5).abs() < f64::EPSILON);
        assert_eq!(copy.style(), original.style());
    }
}
