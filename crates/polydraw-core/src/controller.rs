//! Scene controller: vertex collection, polygon completion and copy placement.

use crate::camera::{OrthographicCamera, ViewConfig, client_to_world};
use crate::input::{Command, MouseButton, PointerEvent};
use crate::scene::{SceneGraph, SceneNode};
use crate::shapes::{MarkerStyle, NodeId, PolygonStyle, Shape, VertexMarker};
use kurbo::{Point, Rect, Size};
use std::collections::HashMap;

/// Minimum number of pending vertices a polygon needs.
const MIN_POLYGON_VERTICES: usize = 3;

/// Interaction state of the controller.
#[derive(Debug, Default)]
pub enum InteractionState {
    /// Nothing pending.
    #[default]
    Idle,
    /// Clicks are being collected as polygon vertices.
    CollectingVertices { vertices: Vec<Point> },
    /// A copy follows the pointer until the next click drops it.
    CopyPlacing {
        /// The clone being placed. Not yet part of the copied shapes.
        active: Shape,
        /// Vertices that were pending when the copy was spawned.
        suspended: Vec<Point>,
    },
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "Idle",
            InteractionState::CollectingVertices { .. } => "CollectingVertices",
            InteractionState::CopyPlacing { .. } => "CopyPlacing",
        }
    }
}

/// Owns the drawing surface, camera, interaction state and shape collections.
///
/// Invalid actions (completing with too few vertices, copying with nothing
/// to copy) are ignored without reporting an error.
#[derive(Debug)]
pub struct SceneController {
    view: ViewConfig,
    camera: OrthographicCamera,
    /// Bounding box of the drawing surface in client pixels.
    surface: Rect,
    scene: SceneGraph,
    state: InteractionState,
    placed_shapes: Vec<Shape>,
    copied_shapes: Vec<Shape>,
    vertex_markers: Vec<VertexMarker>,
    polygon_style: PolygonStyle,
    marker_style: MarkerStyle,
    render_requested: bool,
}

impl SceneController {
    /// Create a controller for a drawing surface of the given pixel size.
    pub fn new(surface_size: Size) -> Self {
        Self::with_view(ViewConfig::default(), surface_size)
    }

    /// Create a controller with custom projection parameters.
    pub fn with_view(view: ViewConfig, surface_size: Size) -> Self {
        let surface = Rect::from_origin_size(Point::ZERO, surface_size);
        Self {
            camera: OrthographicCamera::for_surface(&view, surface_size),
            view,
            surface,
            scene: SceneGraph::new(),
            state: InteractionState::Idle,
            placed_shapes: Vec::new(),
            copied_shapes: Vec::new(),
            vertex_markers: Vec::new(),
            polygon_style: PolygonStyle::default(),
            marker_style: MarkerStyle::default(),
            render_requested: true,
        }
    }

    /// Resize the drawing surface, keeping it anchored at the client origin.
    pub fn resize(&mut self, surface_size: Size) {
        self.set_surface_bounds(Rect::from_origin_size(Point::ZERO, surface_size));
    }

    /// Set the surface bounding box in client pixels and refit the camera.
    pub fn set_surface_bounds(&mut self, bounds: Rect) {
        self.surface = bounds;
        self.camera = OrthographicCamera::for_surface(&self.view, bounds.size());
        log::debug!(
            "surface {}x{}, view x [{:.1}, {:.1}]",
            bounds.width(),
            bounds.height(),
            self.camera.left,
            self.camera.right
        );
        self.request_render();
    }

    /// Route a pointer event to the state machine.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            _ => {}
        }
    }

    /// Route a UI command to the state machine.
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Complete => self.complete(),
            Command::Copy => self.copy(),
            Command::Reset => self.reset(),
        }
    }

    /// Project a client pixel position into world coordinates.
    pub fn to_world(&self, client: Point) -> Point {
        client_to_world(client, self.surface, &self.camera)
    }

    /// Pointer pressed at a client pixel position.
    pub fn pointer_down(&mut self, client: Point) {
        let world = self.to_world(client);
        self.click_world(world);
    }

    /// Pointer moved to a client pixel position.
    pub fn pointer_move(&mut self, client: Point) {
        if matches!(self.state, InteractionState::CopyPlacing { .. }) {
            let world = self.to_world(client);
            self.move_world(world);
        }
    }

    fn click_world(&mut self, world: Point) {
        match std::mem::take(&mut self.state) {
            InteractionState::CopyPlacing {
                mut active,
                suspended,
            } => {
                active.renderable_mut().set_position(world);
                log::debug!(
                    "copy {} placed at ({:.1}, {:.1})",
                    active.id(),
                    world.x,
                    world.y
                );
                self.copied_shapes.push(active);
                self.state = if suspended.is_empty() {
                    InteractionState::Idle
                } else {
                    InteractionState::CollectingVertices {
                        vertices: suspended,
                    }
                };
            }
            InteractionState::Idle => self.add_vertex(world, Vec::new()),
            InteractionState::CollectingVertices { vertices } => self.add_vertex(world, vertices),
        }
        self.request_render();
    }

    fn add_vertex(&mut self, world: Point, mut vertices: Vec<Point>) {
        let marker = VertexMarker::new(world, &self.marker_style);
        self.scene.add(marker.id());
        self.vertex_markers.push(marker);
        vertices.push(world);
        log::debug!(
            "vertex {} at ({:.1}, {:.1})",
            vertices.len(),
            world.x,
            world.y
        );
        self.state = InteractionState::CollectingVertices { vertices };
    }

    fn move_world(&mut self, world: Point) {
        if let InteractionState::CopyPlacing { active, .. } = &mut self.state {
            active.renderable_mut().set_position(world);
            self.request_render();
        }
    }

    /// Finish the pending vertices as a polygon if there are at least three.
    pub fn complete(&mut self) {
        let vertices = match &mut self.state {
            InteractionState::CollectingVertices { vertices }
                if vertices.len() >= MIN_POLYGON_VERTICES =>
            {
                std::mem::take(vertices)
            }
            state => {
                log::debug!("complete ignored in state {}", state.name());
                return;
            }
        };

        let shape = Shape::with_style(vertices, self.polygon_style);
        self.scene.add(shape.renderable().id());
        log::debug!(
            "polygon {} completed with {} vertices",
            shape.id(),
            shape.points().len()
        );
        self.placed_shapes.push(shape);
        self.state = InteractionState::Idle;
        self.request_render();
    }

    /// Spawn a copy of the most recently completed polygon for placement.
    pub fn copy(&mut self) {
        if matches!(self.state, InteractionState::CopyPlacing { .. }) {
            log::debug!("copy ignored: a copy is already being placed");
            return;
        }
        let Some(source) = self.placed_shapes.last() else {
            log::debug!("copy ignored: no completed polygon");
            return;
        };

        let active = source.copy();
        self.scene.add(active.renderable().id());
        log::debug!("copy {} spawned from {}", active.id(), source.id());

        let suspended = match std::mem::take(&mut self.state) {
            InteractionState::CollectingVertices { vertices } => vertices,
            _ => Vec::new(),
        };
        self.state = InteractionState::CopyPlacing { active, suspended };
        self.request_render();
    }

    /// Remove every marker and shape from the scene and return to idle.
    pub fn reset(&mut self) {
        let in_flight = usize::from(self.is_copy_mode());
        log::debug!(
            "reset: removing {} markers, {} polygons, {} copies, {} in-flight copy",
            self.vertex_markers.len(),
            self.placed_shapes.len(),
            self.copied_shapes.len(),
            in_flight
        );
        self.vertex_markers.clear();
        self.placed_shapes.clear();
        self.copied_shapes.clear();
        self.state = InteractionState::Idle;
        self.scene.clear();
        self.request_render();
    }

    /// Flag that the visible scene changed.
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Consume the pending render request, if any.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Vertices collected for the next polygon.
    pub fn pending_vertices(&self) -> &[Point] {
        match &self.state {
            InteractionState::Idle => &[],
            InteractionState::CollectingVertices { vertices } => vertices,
            InteractionState::CopyPlacing { suspended, .. } => suspended,
        }
    }

    pub fn placed_shapes(&self) -> &[Shape] {
        &self.placed_shapes
    }

    pub fn copied_shapes(&self) -> &[Shape] {
        &self.copied_shapes
    }

    pub fn vertex_markers(&self) -> &[VertexMarker] {
        &self.vertex_markers
    }

    /// The copy currently following the pointer.
    pub fn active_shape(&self) -> Option<&Shape> {
        match &self.state {
            InteractionState::CopyPlacing { active, .. } => Some(active),
            _ => None,
        }
    }

    pub fn is_copy_mode(&self) -> bool {
        matches!(self.state, InteractionState::CopyPlacing { .. })
    }

    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    pub fn surface(&self) -> Rect {
        self.surface
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Visible nodes in draw order.
    pub fn visible_nodes(&self) -> Vec<SceneNode<'_>> {
        let mut lookup: HashMap<NodeId, SceneNode<'_>> = HashMap::new();
        for marker in &self.vertex_markers {
            lookup.insert(marker.id(), SceneNode::Marker(marker));
        }
        let shapes = self
            .placed_shapes
            .iter()
            .chain(&self.copied_shapes)
            .chain(self.active_shape());
        for shape in shapes {
            let renderable = shape.renderable();
            lookup.insert(renderable.id(), SceneNode::Polygon(renderable));
        }
        self.scene
            .ordered()
            .filter_map(|id| lookup.remove(&id))
            .collect()
    }
}
