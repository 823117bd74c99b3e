//! Vello-based renderer implementation.

use crate::renderer::{GridSpec, GridStyle, RenderContext, Renderer};
use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::Fill;
use polydraw_core::scene::SceneNode;
use polydraw_core::shapes::{Renderable, VertexMarker};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Draw the world-space grid. Line width stays constant in pixels.
    fn render_grid(&mut self, grid: &GridSpec, transform: Affine) {
        let offsets = grid.line_offsets();
        let (Some(&min), Some(&max)) = (offsets.first(), offsets.last()) else {
            return;
        };

        let mut path = BezPath::new();
        for &offset in &offsets {
            path.move_to(transform * Point::new(offset, min));
            path.line_to(transform * Point::new(offset, max));
            path.move_to(transform * Point::new(min, offset));
            path.line_to(transform * Point::new(max, offset));
        }
        let stroke = Stroke::new(grid.line_width);
        self.scene
            .stroke(&stroke, Affine::IDENTITY, grid.color, None, &path);
    }

    /// Fill and outline a polygon at its current position.
    ///
    /// The outline is stroked in pixel space so its width does not follow the
    /// non-uniform camera scale.
    fn render_polygon(&mut self, renderable: &Renderable, transform: Affine) {
        let transform = transform * renderable.transform();
        self.scene.fill(
            Fill::NonZero,
            transform,
            renderable.fill_color(),
            None,
            renderable.fill(),
        );
        let stroke = Stroke::new(renderable.outline_width());
        self.scene.stroke(
            &stroke,
            Affine::IDENTITY,
            renderable.outline_color(),
            None,
            &outline_in_pixels(renderable, transform),
        );
    }

    fn render_marker(&mut self, marker: &VertexMarker, transform: Affine) {
        self.scene.fill(
            Fill::NonZero,
            transform,
            marker.color,
            None,
            &marker.to_path(),
        );
    }
}

/// Outline path mapped through the full world-to-pixel transform.
fn outline_in_pixels(renderable: &Renderable, transform: Affine) -> BezPath {
    let mut path = renderable.outline().clone();
    path.apply_affine(transform);
    path
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();

        let camera_transform = ctx.controller.camera().view_transform(ctx.viewport_size);

        match ctx.grid_style {
            GridStyle::None => {}
            GridStyle::Lines => self.render_grid(&ctx.grid, camera_transform),
        }

        for node in ctx.controller.visible_nodes() {
            match node {
                SceneNode::Polygon(renderable) => self.render_polygon(renderable, camera_transform),
                SceneNode::Marker(marker) => self.render_marker(marker, camera_transform),
            }
        }
    }
}
