//! Orthographic camera and pointer projection.
//!
//! World space has Y pointing up and the origin at the centre of the view.
//! Screen space (surface pixels) has Y pointing down and the origin at the
//! top-left corner of the drawing surface.

use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Fixed projection parameters for the drawing view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Vertical half-extent of the view in world units.
    pub half_height: f64,
    /// Horizontal half-extent at an aspect ratio of 1.0.
    pub half_width: f64,
    /// Near clipping plane distance.
    pub near: f64,
    /// Far clipping plane distance.
    pub far: f64,
    /// Camera distance from the drawing plane.
    pub camera_z: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            half_height: 300.0,
            half_width: 400.0,
            near: 1.0,
            far: 1000.0,
            camera_z: 10.0,
        }
    }
}

/// An orthographic camera looking down the -Z axis onto the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthographicCamera {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub near: f64,
    pub far: f64,
    /// Camera position in world space (x, y, z).
    pub position: (f64, f64, f64),
}

impl OrthographicCamera {
    /// Create a camera from raw frustum bounds, positioned at the origin.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64, near: f64, far: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            near,
            far,
            position: (0.0, 0.0, 0.0),
        }
    }

    /// Build the view camera for a surface of the given size.
    ///
    /// The vertical extent is fixed; the horizontal extent is scaled by the
    /// aspect ratio so shapes keep their proportions on any window shape.
    pub fn for_surface(config: &ViewConfig, surface: Size) -> Self {
        let aspect = aspect_ratio(surface);
        let mut camera = Self::new(
            -config.half_width * aspect,
            config.half_width * aspect,
            config.half_height,
            -config.half_height,
            config.near,
            config.far,
        );
        camera.set_position(0.0, 0.0, config.camera_z);
        camera
    }

    pub fn set_position(&mut self, x: f64, y: f64, z: f64) {
        self.position = (x, y, z);
    }

    /// Width of the visible region in world units.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the visible region in world units.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Unproject a point in normalized device coordinates to world X/Y.
    pub fn unproject(&self, ndc: Point) -> Point {
        let (cx, cy, _) = self.position;
        Point::new(
            cx + self.left + (ndc.x + 1.0) * 0.5 * self.width(),
            cy + self.bottom + (ndc.y + 1.0) * 0.5 * self.height(),
        )
    }

    /// Affine transform mapping world coordinates to surface pixels.
    pub fn view_transform(&self, surface: Size) -> Affine {
        let (cx, cy, _) = self.position;
        let sx = surface.width / self.width();
        let sy = surface.height / self.height();
        Affine::new([sx, 0.0, 0.0, -sy, -(cx + self.left) * sx, (cy + self.top) * sy])
    }
}

fn aspect_ratio(surface: Size) -> f64 {
    if surface.width <= 0.0 || surface.height <= 0.0 {
        1.0
    } else {
        surface.width / surface.height
    }
}

/// Convert a client-space pointer position into normalized device coordinates
/// relative to the surface bounding box. Y is inverted.
pub fn client_to_ndc(client: Point, bounds: Rect) -> Point {
    let width = bounds.width();
    let height = bounds.height();
    if width <= 0.0 || height <= 0.0 {
        return Point::ZERO;
    }
    Point::new(
        (client.x - bounds.x0) / width * 2.0 - 1.0,
        -(client.y - bounds.y0) / height * 2.0 + 1.0,
    )
}

/// Project a client-space pointer position to world X/Y.
///
/// Pure function of its inputs: the same pixel, bounds and camera always
/// produce the same world point.
pub fn client_to_world(client: Point, bounds: Rect, camera: &OrthographicCamera) -> Point {
    camera.unproject(client_to_ndc(client, bounds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_camera() -> OrthographicCamera {
        OrthographicCamera::for_surface(&ViewConfig::default(), Size::new(800.0, 600.0))
    }

    #[test]
    fn test_frustum_from_aspect() {
        let camera = surface_camera();
        let aspect = 800.0 / 600.0;
        assert!((camera.left + 400.0 * aspect).abs() < 1e-9);
        assert!((camera.right - 400.0 * aspect).abs() < 1e-9);
        assert!((camera.top - 300.0).abs() < f64::EPSILON);
        assert!((camera.bottom + 300.0).abs() < f64::EPSILON);
        assert_eq!(camera.position, (0.0, 0.0, 10.0));
    }

    #[test]
    fn test_wide_surface_keeps_vertical_extent() {
        let camera = OrthographicCamera::for_surface(&ViewConfig::default(), Size::new(1600.0, 400.0));
        assert!((camera.height() - 600.0).abs() < f64::EPSILON);
        assert!((camera.width() - 3200.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_surface_falls_back_to_square() {
        let camera = OrthographicCamera::for_surface(&ViewConfig::default(), Size::new(0.0, 0.0));
        assert!((camera.width() - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_client_to_ndc_corners() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(client_to_ndc(Point::new(0.0, 0.0), bounds), Point::new(-1.0, 1.0));
        assert_eq!(client_to_ndc(Point::new(800.0, 600.0), bounds), Point::new(1.0, -1.0));
        assert_eq!(client_to_ndc(Point::new(400.0, 300.0), bounds), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_client_to_ndc_offset_bounds() {
        let bounds = Rect::new(100.0, 50.0, 300.0, 250.0);
        let ndc = client_to_ndc(Point::new(150.0, 100.0), bounds);
        assert!((ndc.x + 0.5).abs() < f64::EPSILON);
        assert!((ndc.y - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_client_to_world_centre_and_corner() {
        let camera = surface_camera();
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);

        let centre = client_to_world(Point::new(400.0, 300.0), bounds, &camera);
        assert!(centre.x.abs() < 1e-9);
        assert!(centre.y.abs() < 1e-9);

        let top_left = client_to_world(Point::new(0.0, 0.0), bounds, &camera);
        assert!((top_left.x - camera.left).abs() < 1e-9);
        assert!((top_left.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_is_reproducible() {
        let camera = surface_camera();
        let bounds = Rect::new(10.0, 20.0, 810.0, 620.0);
        let pixel = Point::new(123.5, 456.25);
        let first = client_to_world(pixel, bounds, &camera);
        let second = client_to_world(pixel, bounds, &camera);
        assert_eq!(first, second);
    }

    #[test]
    fn test_view_transform_matches_pointer_projection() {
        let camera = surface_camera();
        let surface = Size::new(800.0, 600.0);
        let bounds = Rect::from_origin_size(Point::ZERO, surface);
        let pixel = Point::new(640.0, 120.0);

        let world = client_to_world(pixel, bounds, &camera);
        let back = camera.view_transform(surface) * world;
        assert!((back.x - pixel.x).abs() < 1e-9);
        assert!((back.y - pixel.y).abs() < 1e-9);
    }
}
